use polars::prelude::*;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
}

/// Price sorting; `Default` leaves the table in dataset order
pub fn apply_sort(frame: LazyFrame, order: SortOrder) -> LazyFrame {
    match order {
        SortOrder::Default => frame,
        SortOrder::PriceAsc => frame.sort(["median_price"], SortMultipleOptions::default()),
        SortOrder::PriceDesc => frame.sort(
            ["median_price"],
            SortMultipleOptions::default().with_order_descending(true),
        ),
    }
}
