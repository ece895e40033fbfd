//! Waste records (`/api/v1/management/waste-records`)

use serde_json::Value;

use super::client::{ApiClient, Navigator, Transport};
use crate::error::ApiResult;
use crate::filters::RecordFilters;
use crate::models::{Envelope, Paginated, WasteRecord};
use crate::record_form::WasteRecordPayload;
use crate::storage::KeyValueStore;

const PATH: &str = "/api/v1/management/waste-records";

impl<T, S, N> ApiClient<T, S, N>
where
    T: Transport + Clone,
    S: KeyValueStore + Clone,
    N: Navigator + Clone,
{
    /// One page of records matching the search form; `page` is 1-based
    pub async fn filter_waste_records(
        &self,
        filters: &RecordFilters,
        page: u32,
    ) -> ApiResult<Paginated<WasteRecord>> {
        self.get_json(&format!("{}/filter", PATH), filters.to_query(page)).await
    }

    pub async fn get_waste_record(&self, id: u64) -> ApiResult<WasteRecord> {
        let body: Envelope<WasteRecord> = self.get_json(&format!("{}/{}", PATH, id), Vec::new()).await?;
        Ok(body.into_inner())
    }

    /// Pages reload the list afterwards, so the echoed record is not decoded
    pub async fn create_waste_record(&self, payload: &WasteRecordPayload) -> ApiResult<()> {
        let _: Value = self.post_json(PATH, payload).await?;
        Ok(())
    }

    pub async fn update_waste_record(&self, id: u64, payload: &WasteRecordPayload) -> ApiResult<()> {
        let _: Value = self.put_json(&format!("{}/{}", PATH, id), payload).await?;
        Ok(())
    }

    pub async fn delete_waste_record(&self, id: u64) -> ApiResult<()> {
        self.delete(&format!("{}/{}", PATH, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_form::PayloadItem;
    use crate::testing::test_client;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_filter_sends_search_fields_and_paging() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(
            200,
            json!({
                "data": [{"id": 1, "company_id": 2, "moderator_id": 3, "record_date": "2024-01-05", "items": []}],
                "meta": {"current_page": 2, "per_page": 10, "total": 11}
            }),
        );

        let filters = RecordFilters { car_num: "123ABC02".into(), ..Default::default() };
        let page = block_on(client.filter_waste_records(&filters, 2)).unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.meta.map(|m| m.total), Some(11));
        let sent = transport.last_request();
        assert_eq!(sent.url, "http://api.test/api/v1/management/waste-records/filter");
        assert!(sent.query.contains(&("car_num".into(), "123ABC02".into())));
        assert!(sent.query.contains(&("page".into(), "2".into())));
    }

    #[test]
    fn test_create_omits_absent_factor() {
        let (client, transport, _, _) = test_client();
        transport.reply_json(201, json!({"message": "created"}));

        let payload = WasteRecordPayload {
            company_id: 2,
            moderator_id: 3,
            car_num: String::new(),
            driv_name: String::new(),
            record_date: "2024-01-05".into(),
            items: vec![
                PayloadItem { waste_id: 5, amount: 1.5, factor: None },
                PayloadItem { waste_id: 6, amount: 2.0, factor: Some(0.5) },
            ],
        };
        block_on(client.create_waste_record(&payload)).unwrap();

        let body = transport.last_request().body.unwrap();
        assert_eq!(body["items"][0], json!({"waste_id": 5, "amount": 1.5}));
        assert_eq!(body["items"][1], json!({"waste_id": 6, "amount": 2.0, "factor": 0.5}));
    }
}
