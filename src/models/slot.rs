use serde::{Deserialize, Serialize};

/// Free slot labels for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotOffer {
    pub date: String,
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub slots: Vec<String>,
}

/// Whether any day in the offer still lists `label` on `date`.
pub fn offers_slot(offers: &[SlotOffer], date: &str, label: &str) -> bool {
    offers
        .iter()
        .any(|offer| offer.date == date && offer.slots.iter().any(|s| s == label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_label_on_matching_day_only() {
        let offers = vec![
            SlotOffer {
                date: "2024-06-01".into(),
                day: "Saturday".into(),
                slots: vec!["10:00 - 10:30".into()],
            },
            SlotOffer {
                date: "2024-06-02".into(),
                day: "Sunday".into(),
                slots: vec![],
            },
        ];
        assert!(offers_slot(&offers, "2024-06-01", "10:00 - 10:30"));
        assert!(!offers_slot(&offers, "2024-06-02", "10:00 - 10:30"));
    }
}
