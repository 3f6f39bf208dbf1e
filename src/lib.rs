pub mod aggregate;
pub mod coerce;
pub mod config;
pub mod debounce;
pub mod donor;
pub mod error;
pub mod model;
pub mod normalize;
pub mod render;
pub mod reveal;
pub mod session;
pub mod social;
pub mod source;
pub mod view;

use aggregate::Totals;
use config::Config;
use error::Result;
use model::Donor;

/// The canonical list for one data load and its aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub donors: Vec<Donor>,
    pub totals: Totals,
}

pub fn build_board(text: &str, config: &Config) -> Result<Board> {
    // Stage 0
    let records = source::parse_payload(text)?;

    // Stage 1
    let donors = donor::normalize_donors(&records, config);

    // Stage 2
    let totals = Totals::from_donors(&donors);

    Ok(Board { donors, totals })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_board() {
        let input = r#"[{"name": "an", "amount": "1000"}, {"name": "binh", "amount": 500}]"#;
        let board = build_board(input, &Config::default()).unwrap();
        assert_eq!(board.donors.len(), 2);
        assert_eq!(board.totals, Totals { total: 1500, count: 2 });
        assert_eq!(board.donors[0].name, "An");
    }

    #[test]
    fn test_determinism() {
        let input = r#"[{"name": "x", "amount": 5}, {"anonymous": true, "amount": 5}, {"name": "y", "amount": 9}]"#;
        let config = Config::default();
        let b1 = build_board(input, &config).unwrap();
        let b2 = build_board(input, &config).unwrap();
        assert_eq!(b1, b2);
    }

    #[test]
    fn test_non_array_payload() {
        let board = build_board(r#"{"items": []}"#, &Config::default()).unwrap();
        assert!(board.donors.is_empty());
        assert_eq!(board.totals, Totals::default());
    }

    #[test]
    fn test_out_of_range_amounts_dropped() {
        let board = build_board(r#"[{"amount": 1e19}, {"amount": "1e19"}]"#, &Config::default()).unwrap();
        assert!(board.donors.is_empty());
        assert_eq!(board.totals, Totals::default());

        let input = r#"[{"name": "a", "amount": 9007199254740991}, {"name": "b", "amount": 9007199254740991}, {"amount": 1e19}]"#;
        let board = build_board(input, &Config::default()).unwrap();
        assert_eq!(board.totals.count, 2);
        assert_eq!(board.totals.total, 18_014_398_509_481_982);
    }

    #[test]
    fn test_invalid_payload() {
        assert!(build_board("[", &Config::default()).is_err());
    }
}
