use crate::inventory::models::Asset;
use std::fmt::Display;

impl Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} ({}), purchased {}",
            self.asset_type,
            self.brand,
            self.model,
            self.country.as_deref().unwrap_or("no office"),
            self.purchased
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::inventory::builder::AssetBuilder;
    use chrono::NaiveDate;

    #[test]
    fn test_display() {
        let asset = AssetBuilder::new()
            .asset_type("phone")
            .brand("Nokia")
            .model("G50")
            .price(299.0)
            .purchased(NaiveDate::from_ymd_opt(2021, 5, 1).unwrap())
            .build()
            .unwrap();
        assert_eq!(
            asset.to_string(),
            "Phone Nokia G50 (no office), purchased 2021-05-01"
        );
    }
}
