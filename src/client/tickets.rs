//! Ticket and conversation operations.

use reqwest::header::LINK;
use reqwest::Method;

use super::{FreshdeskClient, CREATED, OK, OK_OR_CREATED};
use crate::error::FreshdeskError;
use crate::models::{
    Attachment, AttachmentOutcome, Page, SdTicketEnvelope, SdTicketMessageEnvelope, Ticket,
    TicketCreatePayload, TicketMessage, TicketMessageCreatePayload, TicketStatusUpdatePayload,
    TicketUpdatePayload,
};

impl FreshdeskClient {
    /// Gets a ticket by ID.
    pub async fn get_ticket(&self, id: u64) -> Result<Ticket, FreshdeskError> {
        self.get(&format!("/api/v2/tickets/{}", id)).await
    }

    /// Gets a ticket with its conversation thread embedded.
    pub async fn get_ticket_with_conversations(&self, id: u64) -> Result<Ticket, FreshdeskError> {
        self.get(&format!("/api/v2/tickets/{}?include=conversations", id))
            .await
    }

    /// Lists tickets.
    ///
    /// Only the first page the server returns is fetched.
    pub async fn get_all_tickets(&self) -> Result<Vec<Ticket>, FreshdeskError> {
        self.get("/api/v2/tickets").await
    }

    /// Lists one page of a company's tickets.
    ///
    /// This is the only operation that waits on the client's rate limiter.
    /// The caller drives paging: `has_more` on the result only reports that
    /// the server sent a `Link` header.
    ///
    /// # Arguments
    ///
    /// * `company_id` - Company whose tickets to list
    /// * `per_page` - Page size
    /// * `page` - 1-based page number
    pub async fn get_tickets_by_company_id(
        &self,
        company_id: u64,
        per_page: u32,
        page: u32,
    ) -> Result<Page<Ticket>, FreshdeskError> {
        self.limiter.acquire().await;

        let path = format!(
            "/api/v2/tickets?company_id={}&per_page={}&page={}",
            company_id, per_page, page
        );
        let request = self.request_builder(Method::GET, &path);
        let response = self.send(request, &Method::GET, &path, OK).await?;

        let has_more = response
            .headers()
            .get(LINK)
            .is_some_and(|value| !value.is_empty());
        let items = Self::decode(response).await?;

        Ok(Page { items, has_more })
    }

    /// Creates a ticket.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Api` with the raw body unless the server
    /// answers 201.
    pub async fn create_ticket(
        &self,
        payload: &TicketCreatePayload,
    ) -> Result<Ticket, FreshdeskError> {
        self.post("/api/v2/tickets", payload, CREATED).await
    }

    /// Creates a ticket on a service-desk account.
    ///
    /// Same request as [`create_ticket`](Self::create_ticket); the response
    /// wraps the ticket in a `ticket` envelope.
    pub async fn create_sd_ticket(
        &self,
        payload: &TicketCreatePayload,
    ) -> Result<Ticket, FreshdeskError> {
        let envelope: SdTicketEnvelope = self.post("/api/v2/tickets", payload, CREATED).await?;
        Ok(envelope.ticket)
    }

    /// Creates a ticket, uploads each attachment, then returns the ticket as
    /// re-read from the server.
    ///
    /// Attachments are uploaded one request each. A failed upload is logged
    /// and skipped; compare the returned ticket's attachments with `files`,
    /// or use [`create_ticket_with_attachments_detailed`], to detect it.
    ///
    /// # Errors
    ///
    /// Fails only if the create or the final fetch fails. No upload is
    /// attempted when the create fails.
    ///
    /// [`create_ticket_with_attachments_detailed`]: Self::create_ticket_with_attachments_detailed
    pub async fn create_ticket_with_attachments(
        &self,
        payload: &TicketCreatePayload,
        files: &[Attachment],
    ) -> Result<Ticket, FreshdeskError> {
        let (ticket, _) = self
            .create_ticket_with_attachments_detailed(payload, files)
            .await?;
        Ok(ticket)
    }

    /// Like [`create_ticket_with_attachments`](Self::create_ticket_with_attachments)
    /// but also returns one outcome per attachment, in input order.
    pub async fn create_ticket_with_attachments_detailed(
        &self,
        payload: &TicketCreatePayload,
        files: &[Attachment],
    ) -> Result<(Ticket, Vec<AttachmentOutcome>), FreshdeskError> {
        let created = self.create_ticket(payload).await?;
        self.attach_and_refetch(created.id, files).await
    }

    /// Service-desk flavour of
    /// [`create_ticket_with_attachments`](Self::create_ticket_with_attachments).
    pub async fn create_sd_ticket_with_attachments(
        &self,
        payload: &TicketCreatePayload,
        files: &[Attachment],
    ) -> Result<Ticket, FreshdeskError> {
        let created = self.create_sd_ticket(payload).await?;
        let (ticket, _) = self.attach_and_refetch(created.id, files).await?;
        Ok(ticket)
    }

    async fn attach_and_refetch(
        &self,
        ticket_id: u64,
        files: &[Attachment],
    ) -> Result<(Ticket, Vec<AttachmentOutcome>), FreshdeskError> {
        let mut outcomes = Vec::with_capacity(files.len());

        for file in files {
            let error = self.upload_attachment(ticket_id, file).await.err();
            if let Some(e) = &error {
                tracing::warn!(
                    ticket_id,
                    file_name = %file.file_name,
                    error = %e,
                    "Attachment upload failed, continuing"
                );
            }
            outcomes.push(AttachmentOutcome {
                file_name: file.file_name.clone(),
                error,
            });
        }

        let ticket = self.get_ticket(ticket_id).await?;
        Ok((ticket, outcomes))
    }

    async fn upload_attachment(
        &self,
        ticket_id: u64,
        file: &Attachment,
    ) -> Result<(), FreshdeskError> {
        let path = format!("/api/v2/tickets/{}", ticket_id);
        let request = self
            .request_builder(Method::PUT, &path)
            .multipart(file.to_form()?);

        self.send(request, &Method::PUT, &path, OK).await?;
        Ok(())
    }

    /// Updates a ticket; only the fields set on `payload` are sent.
    pub async fn update_ticket(
        &self,
        id: u64,
        payload: &TicketUpdatePayload,
    ) -> Result<Ticket, FreshdeskError> {
        self.put(&format!("/api/v2/tickets/{}", id), payload).await
    }

    /// Changes only a ticket's status.
    pub async fn update_ticket_status(
        &self,
        id: u64,
        payload: &TicketStatusUpdatePayload,
    ) -> Result<Ticket, FreshdeskError> {
        self.put(&format!("/api/v2/tickets/{}", id), payload).await
    }

    /// Posts a reply on a ticket.
    ///
    /// The endpoint answers 200 or 201 depending on the ticket type; both
    /// count as success.
    pub async fn create_ticket_message(
        &self,
        ticket_id: u64,
        payload: &TicketMessageCreatePayload,
    ) -> Result<TicketMessage, FreshdeskError> {
        self.post(
            &format!("/api/v2/tickets/{}/reply", ticket_id),
            payload,
            OK_OR_CREATED,
        )
        .await
    }

    /// Service-desk flavour of [`create_ticket_message`](Self::create_ticket_message);
    /// the response wraps the reply in a `conversation` envelope.
    pub async fn create_sd_ticket_message(
        &self,
        ticket_id: u64,
        payload: &TicketMessageCreatePayload,
    ) -> Result<TicketMessage, FreshdeskError> {
        let envelope: SdTicketMessageEnvelope = self
            .post(
                &format!("/api/v2/tickets/{}/reply", ticket_id),
                payload,
                OK_OR_CREATED,
            )
            .await?;
        Ok(envelope.conversation)
    }

    /// Deletes a ticket.
    pub async fn delete_ticket(&self, id: u64) -> Result<(), FreshdeskError> {
        self.delete(&format!("/api/v2/tickets/{}", id)).await
    }
}
