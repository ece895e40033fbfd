//! Waste categories (`/api/waste-categories`)

use super::client::{ApiClient, Navigator, Transport};
use crate::error::ApiResult;
use crate::models::{CategoryPayload, Envelope, Paginated, WasteCategory};
use crate::storage::KeyValueStore;

const PATH: &str = "/api/waste-categories";

impl<T, S, N> ApiClient<T, S, N>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    pub async fn list_categories(&self) -> ApiResult<Vec<WasteCategory>> {
        let page: Paginated<WasteCategory> = self.get_json(PATH, Vec::new()).await?;
        Ok(page.data)
    }

    pub async fn get_category(&self, id: u64) -> ApiResult<WasteCategory> {
        let body: Envelope<WasteCategory> = self.get_json(&format!("{}/{}", PATH, id), Vec::new()).await?;
        Ok(body.into_inner())
    }

    pub async fn create_category(&self, payload: &CategoryPayload) -> ApiResult<WasteCategory> {
        let body: Envelope<WasteCategory> = self.post_json(PATH, payload).await?;
        Ok(body.into_inner())
    }

    pub async fn update_category(&self, id: u64, payload: &CategoryPayload) -> ApiResult<WasteCategory> {
        let body: Envelope<WasteCategory> = self.put_json(&format!("{}/{}", PATH, id), payload).await?;
        Ok(body.into_inner())
    }

    pub async fn delete_category(&self, id: u64) -> ApiResult<()> {
        self.delete(&format!("{}/{}", PATH, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::testing::test_client;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_list_accepts_wrapped_data() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(200, json!({"data": [{"id": 1, "name": "Пластик", "slug": "plastik"}]}));

        let categories = block_on(client.list_categories()).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].slug, "plastik");
    }

    #[test]
    fn test_update_puts_to_item_path() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(200, json!({"id": 4, "name": "Стекло", "slug": "steklo"}));

        let payload = CategoryPayload { name: "Стекло".into(), slug: "steklo".into() };
        let updated = block_on(client.update_category(4, &payload)).unwrap();

        assert_eq!(updated.id, 4);
        let sent = transport.last_request();
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.url, "http://api.test/api/waste-categories/4");
        assert_eq!(sent.body, Some(json!({"name": "Стекло", "slug": "steklo"})));
    }

    #[test]
    fn test_delete_ignores_body() {
        let (client, transport, _, _) = test_client();
        transport.reply_bytes(204, Vec::new());

        block_on(client.delete_category(9)).unwrap();
        assert_eq!(transport.last_request().method, Method::Delete);
    }
}
