use crate::domain::model::{DestinationListingPayload, SkuRecord, SourceItem, SpecAttribute};

/// Tax code applied to every listing; not configurable per item.
pub const DEFAULT_TAX_CODE: &str = "P0000000";

pub const SKU_SUFFIX: &str = "-DEFAULT";

/// 將 eBay 項目轉換為 TEMU 上架資料。單一 SKU，缺值補預設。
pub fn map_item(item: &SourceItem) -> DestinationListingPayload {
    let spec_list = item
        .specifics
        .iter()
        .map(|(name, value)| SpecAttribute {
            spec_name: name.clone(),
            spec_value: value.clone(),
        })
        .collect();

    DestinationListingPayload {
        external_goods_id: item.id.clone(),
        goods_name: item.title.clone(),
        sku_list: vec![SkuRecord {
            external_sku_id: format!("{}{}", item.id, SKU_SUFFIX),
            stock_quantity: item.quantity.unwrap_or(0),
            price: item.price.unwrap_or(0.0),
            spec_list,
        }],
        tax_code: DEFAULT_TAX_CODE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn full_item() -> SourceItem {
        let mut specifics = BTreeMap::new();
        specifics.insert("Brand".to_string(), "SyncMaster".to_string());
        specifics.insert("Type".to_string(), "Test Item".to_string());

        SourceItem {
            id: "TEST-SYNC-ITEM-001".to_string(),
            title: Some("Professional Sync Test Product".to_string()),
            price: Some(24.99),
            quantity: Some(10),
            specifics,
        }
    }

    #[test]
    fn test_map_full_item() {
        let payload = map_item(&full_item());

        assert_eq!(payload.external_goods_id, "TEST-SYNC-ITEM-001");
        assert_eq!(
            payload.goods_name.as_deref(),
            Some("Professional Sync Test Product")
        );
        assert_eq!(payload.tax_code, DEFAULT_TAX_CODE);
        assert_eq!(payload.sku_list.len(), 1);

        let sku = &payload.sku_list[0];
        assert_eq!(sku.external_sku_id, "TEST-SYNC-ITEM-001-DEFAULT");
        assert_eq!(sku.stock_quantity, 10);
        assert_eq!(sku.price, 24.99);
        assert_eq!(
            sku.spec_list,
            vec![
                SpecAttribute {
                    spec_name: "Brand".to_string(),
                    spec_value: "SyncMaster".to_string(),
                },
                SpecAttribute {
                    spec_name: "Type".to_string(),
                    spec_value: "Test Item".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_map_sparse_item_uses_defaults() {
        let item = SourceItem {
            id: "SPARSE-1".to_string(),
            title: None,
            price: None,
            quantity: None,
            specifics: BTreeMap::new(),
        };

        let payload = map_item(&item);
        let sku = &payload.sku_list[0];

        assert_eq!(sku.external_sku_id, "SPARSE-1-DEFAULT");
        assert_eq!(sku.stock_quantity, 0);
        assert_eq!(sku.price, 0.0);
        assert!(sku.spec_list.is_empty());
        assert!(payload.goods_name.is_none());

        // null name on the wire, not a missing field
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("goods_name").unwrap().is_null());
    }

    #[test]
    fn test_map_is_deterministic() {
        let item = full_item();
        assert_eq!(map_item(&item), map_item(&item));
        assert_eq!(
            serde_json::to_string(&map_item(&item)).unwrap(),
            serde_json::to_string(&map_item(&item)).unwrap()
        );
    }

    #[test]
    fn test_one_attribute_per_specific() {
        let mut item = full_item();
        for i in 0..7 {
            item.specifics
                .insert(format!("Aspect {}", i), format!("Value {}", i));
        }

        let payload = map_item(&item);
        let specs = &payload.sku_list[0].spec_list;

        assert_eq!(specs.len(), item.specifics.len());
        for spec in specs {
            assert_eq!(item.specifics.get(&spec.spec_name), Some(&spec.spec_value));
        }
    }
}
