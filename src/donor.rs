use crate::coerce::coerce_amount;
use crate::config::Config;
use crate::model::{Donor, RawDonorRecord, RawSocial};
use crate::normalize::title_case;
use crate::social::normalize_social;
use serde_json::Value;
use tracing::debug;

pub fn normalize_donors(list: &[Value], config: &Config) -> Vec<Donor> {
    let records: Vec<RawDonorRecord> = list.iter().map(RawDonorRecord::from_value).collect();
    normalize_records(&records, config)
}

/// Builds the canonical, ranked donor list. Records without a positive
/// amount are dropped; the rest are ordered by amount (stable) and ranked
/// densely from 1.
pub fn normalize_records(records: &[RawDonorRecord], config: &Config) -> Vec<Donor> {
    let mut anonymous_seq = 0usize;
    let mut donors: Vec<Donor> = Vec::with_capacity(records.len());

    for (index, raw) in records.iter().enumerate() {
        let amount = coerce_amount(raw.amount.as_ref());
        if amount == 0 {
            debug!(index, "dropping record without a positive amount");
            continue;
        }

        let donor = if raw.anonymous {
            let name = if raw.name.is_empty() {
                anonymous_seq += 1;
                format!("{} {}", config.anonymous_label, anonymous_seq)
            } else {
                title_case(&raw.name)
            };
            Donor {
                name,
                amount,
                avatar: String::new(),
                is_anonymous: true,
                social: None,
                rank: 0,
                date: raw.date.clone(),
            }
        } else {
            let name = if raw.name.is_empty() {
                config.unnamed_label.clone()
            } else {
                title_case(&raw.name)
            };
            let social = normalize_social(&raw.social)
                .or_else(|| normalize_social(&RawSocial::Fields(raw.legacy.clone())));
            Donor {
                name,
                amount,
                avatar: raw.avatar.clone(),
                is_anonymous: false,
                social,
                rank: 0,
                date: raw.date.clone(),
            }
        };
        donors.push(donor);
    }

    // sort_by is stable: equal amounts keep input order
    donors.sort_by(|a, b| b.amount.cmp(&a.amount));
    for (i, donor) in donors.iter_mut().enumerate() {
        donor.rank = i + 1;
    }
    donors
}
