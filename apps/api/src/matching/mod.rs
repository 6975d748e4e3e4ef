pub mod keywords;

pub use keywords::{coverage_percent, match_keywords, KeywordMatchReport, KeywordRecord, MatchType};
