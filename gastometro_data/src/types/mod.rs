mod lenient;

mod legislator;
pub use self::legislator::{
    parse_legislators, Legislator, LegislatorID, LegislatorMap, PrecomputedTotals, YearExpenses,
};

mod rankings;
pub use self::rankings::{AmountTable, RankingsDocument, OVERALL_KEY, TOTAL_KEY};
