//! Company operations.

use super::{FreshdeskClient, CREATED};
use crate::error::FreshdeskError;
use crate::models::{
    Company, CompanyCreatePayload, CompanyName, CompanyUpdatePayload, SearchCompaniesResponse,
};

impl FreshdeskClient {
    /// Gets a company by ID.
    pub async fn get_company(&self, id: u64) -> Result<Company, FreshdeskError> {
        self.get(&format!("/api/v2/companies/{}", id)).await
    }

    /// Lists companies (first page only).
    pub async fn get_all_companies(&self) -> Result<Vec<Company>, FreshdeskError> {
        self.get("/api/v2/companies").await
    }

    /// Searches companies whose name starts with `mask`.
    pub async fn search_companies(&self, mask: &str) -> Result<Vec<CompanyName>, FreshdeskError> {
        let response: SearchCompaniesResponse = self
            .get(&format!(
                "/api/v2/companies/autocomplete?name={}",
                urlencoding::encode(mask)
            ))
            .await?;
        Ok(response.companies)
    }

    /// Creates a company.
    pub async fn create_company(
        &self,
        payload: &CompanyCreatePayload,
    ) -> Result<Company, FreshdeskError> {
        self.post("/api/v2/companies", payload, CREATED).await
    }

    /// Updates a company.
    pub async fn update_company(
        &self,
        id: u64,
        payload: &CompanyUpdatePayload,
    ) -> Result<Company, FreshdeskError> {
        self.put(&format!("/api/v2/companies/{}", id), payload).await
    }

    /// Deletes a company.
    pub async fn delete_company(&self, id: u64) -> Result<(), FreshdeskError> {
        self.delete(&format!("/api/v2/companies/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::FreshdeskClient;
    use crate::models::CompanyPayload;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_search_companies_encodes_mask() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/companies/autocomplete"))
            .and(query_param("name", "Acme & Co"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "companies": [
                    {"id": 100, "name": "Acme & Co"},
                    {"id": 101, "name": "Acme & Co Nordic"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = FreshdeskClient::for_tests(&mock_server.uri());
        let companies = client.search_companies("Acme & Co").await.unwrap();

        assert_eq!(
            companies.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![100, 101]
        );
    }

    #[tokio::test]
    async fn test_get_all_companies() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/companies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "name": "Acme", "domains": null},
                {"id": 2, "name": "Globex", "domains": ["globex.example"]}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = FreshdeskClient::for_tests(&mock_server.uri());
        let companies = client.get_all_companies().await.unwrap();

        assert_eq!(companies.len(), 2);
        assert!(companies[0].domains.is_empty());
        assert_eq!(companies[1].domains, vec!["globex.example"]);
    }

    #[tokio::test]
    async fn test_company_crud() {
        let mock_server = MockServer::start().await;
        let company = serde_json::json!({"id": 100, "name": "Initech", "domains": []});

        Mock::given(method("POST"))
            .and(path("/api/v2/companies"))
            .and(body_json(serde_json::json!({"name": "Initech"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(company.clone()))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v2/companies/100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(company.clone()))
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/api/v2/companies/100"))
            .and(body_json(serde_json::json!({"industry": "Software"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(company))
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/api/v2/companies/100"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = FreshdeskClient::for_tests(&mock_server.uri());

        let created = client
            .create_company(&CompanyPayload::named("Initech"))
            .await
            .unwrap();
        let fetched = client.get_company(created.id).await.unwrap();
        assert_eq!(fetched.id, 100);

        let update = CompanyPayload {
            industry: Some("Software".to_string()),
            ..Default::default()
        };
        client.update_company(100, &update).await.unwrap();
        client.delete_company(100).await.unwrap();
    }
}
