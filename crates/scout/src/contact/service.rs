use std::sync::Arc;
use tracing::{info, warn};

use super::{ContactError, ContactForm};
use crate::api::{CandidateApi, SendMessageResponse};
use crate::contacted::ContactedStore;
use crate::history::{MessageHistory, MessageRecord};

/// Sends contact messages and records the outcome
#[derive(Clone)]
pub struct ContactService {
    api: Arc<dyn CandidateApi>,
    contacted: Arc<ContactedStore>,
    history: Arc<MessageHistory>,
}

impl ContactService {
    pub fn new(
        api: Arc<dyn CandidateApi>,
        contacted: Arc<ContactedStore>,
        history: Arc<MessageHistory>,
    ) -> Self {
        Self {
            api,
            contacted,
            history,
        }
    }

    /// Contact `username` with `form`.
    ///
    /// Nothing is sent when the candidate was already contacted or the form
    /// does not validate. On success the message is appended to the history
    /// and the candidate is marked as contacted.
    pub async fn contact(
        &self,
        username: &str,
        form: &ContactForm,
    ) -> Result<SendMessageResponse, ContactError> {
        if self.contacted.is_contacted(username) {
            return Err(ContactError::AlreadyContacted(username.to_string()));
        }

        form.validate().map_err(ContactError::Invalid)?;

        let response = match self.api.send_message(&form.to_request()).await {
            Ok(response) => response,
            Err(e) if e.is_invalid_role() => {
                warn!("Role {:?} rejected for @{}", form.role, username);
                return Err(ContactError::InvalidRole {
                    message: e.to_string(),
                });
            }
            Err(e) => return Err(ContactError::Api(e)),
        };

        self.history
            .append(MessageRecord::from_response(username, &response))
            .await;
        self.contacted.mark_as_contacted(username).await;

        info!("Message {} sent to @{}", response.id, username);
        Ok(response)
    }
}
