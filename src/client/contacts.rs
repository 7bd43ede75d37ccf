//! Contact operations.

use super::{FreshdeskClient, CREATED};
use crate::error::FreshdeskError;
use crate::models::{
    Contact, ContactCreatePayload, ContactShort, ContactUpdatePayload, SearchContactsResponse,
};

const CONTACTS_ENDPOINT: &str = "/api/v2/contacts";

impl FreshdeskClient {
    /// Finds the contact whose primary email matches `email`.
    ///
    /// When several contacts match, the first search result is returned.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::NotFound` if the search has no results.
    pub async fn find_contact_by_email(&self, email: &str) -> Result<Contact, FreshdeskError> {
        let query = urlencoding::encode(&format!("'{}'", email)).into_owned();
        let response: SearchContactsResponse = self
            .get(&format!("/api/v2/search/contacts?query=\"email:{}\"", query))
            .await?;

        if response.total == 0 {
            return Err(FreshdeskError::not_found(email));
        }

        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| FreshdeskError::not_found(email))
    }

    /// Gets a contact by ID.
    pub async fn get_contact(&self, id: u64) -> Result<Contact, FreshdeskError> {
        self.get(&format!("{}/{}", CONTACTS_ENDPOINT, id)).await
    }

    /// Lists every contact, following `Link` headers across pages.
    ///
    /// # Errors
    ///
    /// Fails as soon as any page fails; records from earlier pages are
    /// dropped.
    pub async fn get_all_contacts(&self) -> Result<Vec<ContactShort>, FreshdeskError> {
        self.get_all_pages(CONTACTS_ENDPOINT).await
    }

    /// Creates a contact.
    pub async fn create_contact(
        &self,
        payload: &ContactCreatePayload,
    ) -> Result<Contact, FreshdeskError> {
        self.post(CONTACTS_ENDPOINT, payload, CREATED).await
    }

    /// Updates a contact.
    ///
    /// List fields left empty on `payload` are not sent. To change company
    /// associations without losing existing ones, build the payload with
    /// [`ContactUpdatePayload::from_contact`].
    pub async fn update_contact(
        &self,
        id: u64,
        payload: &ContactUpdatePayload,
    ) -> Result<Contact, FreshdeskError> {
        self.put(&format!("{}/{}", CONTACTS_ENDPOINT, id), payload)
            .await
    }

    /// Moves a contact to the trash.
    pub async fn soft_delete_contact(&self, id: u64) -> Result<(), FreshdeskError> {
        self.delete(&format!("{}/{}", CONTACTS_ENDPOINT, id)).await
    }

    /// Deletes a contact permanently, even if it was not soft-deleted first.
    pub async fn permanently_delete_contact(&self, id: u64) -> Result<(), FreshdeskError> {
        self.delete(&format!("{}/{}/hard_delete?force=true", CONTACTS_ENDPOINT, id))
            .await
    }

    /// Associates a contact with an additional company.
    ///
    /// The update carries every mutable field of `contact` so nothing is
    /// cleared. An existing association with `company_id` is replaced.
    ///
    /// # Returns
    ///
    /// The contact as updated by the server.
    pub async fn add_other_company_for_contact(
        &self,
        contact: &Contact,
        company_id: u64,
        view_all_tickets: bool,
    ) -> Result<Contact, FreshdeskError> {
        let mut payload = ContactUpdatePayload::from_contact(contact);
        payload.upsert_other_company(company_id, view_all_tickets);

        tracing::debug!(
            contact_id = contact.id,
            company_id,
            "Adding other company to contact"
        );
        self.update_contact(contact.id, &payload).await
    }

    /// Sets a contact's primary company, keeping its other associations.
    pub async fn add_main_company_for_contact(
        &self,
        contact: &Contact,
        company_id: u64,
    ) -> Result<Contact, FreshdeskError> {
        let mut payload = ContactUpdatePayload::from_contact(contact);
        payload.company_id = Some(company_id);

        tracing::debug!(
            contact_id = contact.id,
            company_id,
            "Setting main company of contact"
        );
        self.update_contact(contact.id, &payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::FreshdeskClient;
    use crate::models::ContactCreatePayload;
    use reqwest::StatusCode;
    use tokio_test::assert_ok;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn contact_json(id: u64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": "Jane Roe",
            "email": "jane+support@example.com",
            "company_id": 100,
            "view_all_tickets": true,
            "other_companies": [],
            "tags": []
        })
    }

    #[tokio::test]
    async fn test_find_contact_by_email_quotes_and_encodes() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/search/contacts"))
            .and(query_param("query", "\"email:'jane+support@example.com'\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total": 1,
                "results": [contact_json(9)]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = FreshdeskClient::for_tests(&mock_server.uri());
        let contact = client
            .find_contact_by_email("jane+support@example.com")
            .await
            .unwrap();

        assert_eq!(contact.id, 9);
    }

    #[tokio::test]
    async fn test_create_contact() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v2/contacts"))
            .and(body_json(serde_json::json!({
                "name": "Jane Roe",
                "email": "jane+support@example.com",
                "company_id": 100
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(contact_json(9)))
            .mount(&mock_server)
            .await;

        let client = FreshdeskClient::for_tests(&mock_server.uri());
        let payload = ContactCreatePayload {
            name: Some("Jane Roe".to_string()),
            email: Some("jane+support@example.com".to_string()),
            company_id: Some(100),
            ..Default::default()
        };
        let contact = client.create_contact(&payload).await.unwrap();

        assert_eq!(contact.company_id, Some(100));
    }

    #[tokio::test]
    async fn test_delete_contact_variants() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/v2/contacts/9"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/api/v2/contacts/9/hard_delete"))
            .and(query_param("force", "true"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = FreshdeskClient::for_tests(&mock_server.uri());
        assert_ok!(client.soft_delete_contact(9).await);
        assert_ok!(client.permanently_delete_contact(9).await);
    }

    #[tokio::test]
    async fn test_add_main_company_keeps_other_companies() {
        let mock_server = MockServer::start().await;
        let mut existing = contact_json(9);
        existing["other_companies"] = serde_json::json!([{"id": 7, "view_all_tickets": false}]);
        let contact = serde_json::from_value(existing).unwrap();

        let mut updated = contact_json(9);
        updated["company_id"] = serde_json::json!(200);

        Mock::given(method("PUT"))
            .and(path("/api/v2/contacts/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(updated))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = FreshdeskClient::for_tests(&mock_server.uri());
        let result = client
            .add_main_company_for_contact(&contact, 200)
            .await
            .unwrap();
        assert_eq!(result.company_id, Some(200));

        let requests = mock_server.received_requests().await.unwrap();
        let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(sent["company_id"], 200);
        assert_eq!(
            sent["other_companies"],
            serde_json::json!([{"company_id": 7, "view_all_tickets": false}])
        );
    }

    #[tokio::test]
    async fn test_update_contact_conflict_is_api_error() {
        let mock_server = MockServer::start().await;
        let body = r#"{"description":"Validation failed","errors":[{"field":"email","message":"It should be a unique value","code":"duplicate_value"}]}"#;

        Mock::given(method("PUT"))
            .and(path("/api/v2/contacts/9"))
            .respond_with(ResponseTemplate::new(409).set_body_string(body))
            .mount(&mock_server)
            .await;

        let client = FreshdeskClient::for_tests(&mock_server.uri());
        let err = client
            .update_contact(9, &Default::default())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
        assert_eq!(err.message(), Some(body));
    }
}
