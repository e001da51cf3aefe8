use crate::config::models::ConfigOpts;
use serde::Serialize;
use std::{fmt::Debug, fmt::Display};

fn __display<T>(opt: Option<&T>) -> String
where
    T: Serialize + Debug,
{
    if let Some(opt) = opt {
        match ron::to_string(opt) {
            Ok(ron) => ron,
            Err(_) => format!("{:?}", opt),
        }
    } else {
        "None".to_string()
    }
}

impl Display for ConfigOpts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let report = self.report.as_ref();
        writeln!(
            f,
            "Currency: {}",
            __display(report.and_then(|r| r.currency.as_ref()))
        )?;
        writeln!(
            f,
            "Country: {}",
            __display(report.and_then(|r| r.country.as_ref()))
        )?;
        writeln!(
            f,
            "Asset type: {}",
            __display(report.and_then(|r| r.asset_type.as_ref()))
        )?;
        writeln!(
            f,
            "Sort keys: {}",
            __display(report.and_then(|r| r.sort.as_ref()))
        )?;
        writeln!(
            f,
            "Legend: {}",
            __display(report.and_then(|r| r.legend.as_ref()))
        )?;
        writeln!(
            f,
            "Color: {}",
            __display(report.and_then(|r| r.color.as_ref()))
        )?;
        writeln!(
            f,
            "As of: {}",
            __display(report.and_then(|r| r.as_of.as_ref()))
        )?;
        writeln!(
            f,
            "Include models: {}",
            __display(report.and_then(|r| r.include_models.as_ref()))
        )?;
        writeln!(
            f,
            "Ignore models: {}",
            __display(report.and_then(|r| r.ignore_models.as_ref()))
        )?;

        // Inventory
        writeln!(
            f,
            "Inventory path: {}",
            __display(self.inventory.as_ref().and_then(|i| i.path.as_ref()))
        )?;

        // Lifecycle
        let lifecycle = self.lifecycle.as_ref();
        writeln!(
            f,
            "Tiers: {}",
            __display(lifecycle.and_then(|l| l.tiers.as_ref()))
        )?;
        writeln!(
            f,
            "Tier bands: {}",
            __display(lifecycle.and_then(|l| l.bands.as_ref()))
        )?;

        // Rates
        write!(f, "Rates: {}", __display(self.rates.as_ref()))
    }
}
