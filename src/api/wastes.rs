//! Waste types (`/api/wastes`) and the flat option list used by record forms

use super::client::{ApiClient, Navigator, Transport};
use crate::error::ApiResult;
use crate::models::{Envelope, Paginated, Waste, WastePayload};
use crate::storage::KeyValueStore;

const PATH: &str = "/api/wastes";

impl<T, S, N> ApiClient<T, S, N>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    pub async fn list_wastes(&self) -> ApiResult<Vec<Waste>> {
        let page: Paginated<Waste> = self.get_json(PATH, Vec::new()).await?;
        Ok(page.data)
    }

    pub async fn get_waste(&self, id: u64) -> ApiResult<Waste> {
        let body: Envelope<Waste> = self.get_json(&format!("{}/{}", PATH, id), Vec::new()).await?;
        Ok(body.into_inner())
    }

    pub async fn create_waste(&self, payload: &WastePayload) -> ApiResult<Waste> {
        let body: Envelope<Waste> = self.post_json(PATH, payload).await?;
        Ok(body.into_inner())
    }

    pub async fn update_waste(&self, id: u64, payload: &WastePayload) -> ApiResult<Waste> {
        let body: Envelope<Waste> = self.put_json(&format!("{}/{}", PATH, id), payload).await?;
        Ok(body.into_inner())
    }

    pub async fn delete_waste(&self, id: u64) -> ApiResult<()> {
        self.delete(&format!("{}/{}", PATH, id)).await
    }

    /// GET /api/v1/wastes/type, the selectable wastes for record line items
    pub async fn list_waste_options(&self) -> ApiResult<Vec<Waste>> {
        let page: Paginated<Waste> = self.get_json("/api/v1/wastes/type", Vec::new()).await?;
        Ok(page.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_client;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_create_payload_shape() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(201, json!({"data": {"id": 11, "name": "ПЭТ бутылка", "slug": "pet-butylka", "category_id": 1}}));

        let payload = WastePayload {
            name: "ПЭТ бутылка".into(),
            slug: "pet-butylka".into(),
            category_id: 1,
            final_waste_type_id: None,
        };
        let waste = block_on(client.create_waste(&payload)).unwrap();

        assert_eq!(waste.effective_category_id(), Some(1));
        assert_eq!(
            transport.last_request().body,
            Some(json!({"name": "ПЭТ бутылка", "slug": "pet-butylka", "category_id": 1, "final_waste_type_id": null}))
        );
    }

    #[test]
    fn test_waste_options_endpoint() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(200, json!([{"id": 1, "name": "Картон"}, {"id": 2, "name": "Стекло"}]));

        let options = block_on(client.list_waste_options()).unwrap();

        assert_eq!(options.len(), 2);
        assert_eq!(transport.last_request().url, "http://api.test/api/v1/wastes/type");
    }
}
