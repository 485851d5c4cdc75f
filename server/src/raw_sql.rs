//! SQL fragments diesel's DSL has no builder for.

use diesel::dsl::sql;
use diesel::expression::SqlLiteral;
use diesel::sql_types::BigInt;

/// `COUNT(*) OVER()`: selected next to each row of a paginated listing, it
/// carries the number of matching rows before LIMIT/OFFSET apply, so the
/// page and its total come back in one round trip.
pub fn count_over() -> SqlLiteral<BigInt> {
    sql::<BigInt>("COUNT(*) OVER()")
}
