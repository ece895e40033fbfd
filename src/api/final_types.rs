//! Final waste types (`/api/final-waste-types`)

use super::client::{ApiClient, Navigator, Transport};
use crate::error::ApiResult;
use crate::models::{Envelope, FinalWasteType, FinalWasteTypePayload, Paginated};
use crate::storage::KeyValueStore;

const PATH: &str = "/api/final-waste-types";

impl<T, S, N> ApiClient<T, S, N>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    pub async fn list_final_waste_types(&self) -> ApiResult<Vec<FinalWasteType>> {
        let page: Paginated<FinalWasteType> = self.get_json(PATH, Vec::new()).await?;
        Ok(page.data)
    }

    pub async fn get_final_waste_type(&self, id: u64) -> ApiResult<FinalWasteType> {
        let body: Envelope<FinalWasteType> = self.get_json(&format!("{}/{}", PATH, id), Vec::new()).await?;
        Ok(body.into_inner())
    }

    pub async fn create_final_waste_type(&self, payload: &FinalWasteTypePayload) -> ApiResult<FinalWasteType> {
        let body: Envelope<FinalWasteType> = self.post_json(PATH, payload).await?;
        Ok(body.into_inner())
    }

    pub async fn update_final_waste_type(
        &self,
        id: u64,
        payload: &FinalWasteTypePayload,
    ) -> ApiResult<FinalWasteType> {
        let body: Envelope<FinalWasteType> = self.put_json(&format!("{}/{}", PATH, id), payload).await?;
        Ok(body.into_inner())
    }

    pub async fn delete_final_waste_type(&self, id: u64) -> ApiResult<()> {
        self.delete(&format!("{}/{}", PATH, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::error::ApiError;
    use crate::testing::test_client;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_create_sends_numeric_factor() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(
            201,
            json!({"data": {"id": 2, "final_name": "Вторсырьё", "type_operation": "Переработка", "factor": "0.80"}}),
        );

        let payload = FinalWasteTypePayload {
            final_name: "Вторсырьё".into(),
            type_operation: "Переработка".into(),
            factor: 0.8,
        };
        let created = block_on(client.create_final_waste_type(&payload)).unwrap();

        assert_eq!(created.factor, 0.8);
        let sent = transport.last_request();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.body.unwrap()["factor"], json!(0.8));
    }

    #[test]
    fn test_validation_error_surfaces_first_field_message() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(422, json!({"errors": {"final_name": ["Поле обязательно"]}}));

        let payload = FinalWasteTypePayload {
            final_name: String::new(),
            type_operation: "Захоронение".into(),
            factor: 1.0,
        };
        let err = block_on(client.create_final_waste_type(&payload)).unwrap_err();

        assert_eq!(err.status(), Some(422));
        assert!(matches!(err, ApiError::Http { .. }));
        assert_eq!(err.user_message("Ошибка"), "Поле обязательно");
    }
}
