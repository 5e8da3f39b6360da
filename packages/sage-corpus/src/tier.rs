use serde::{Deserialize, Serialize};

/// Knowledge-base segment a document belongs to. The two general tiers are
/// selected by entitlement; the expert tier is queried on every call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
	GeneralSignal,
	GeneralNoSignal,
	Expert,
}
impl Tier {
	pub const ALL: [Self; 3] = [Self::GeneralSignal, Self::GeneralNoSignal, Self::Expert];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::GeneralSignal => "general_signal",
			Self::GeneralNoSignal => "general_no_signal",
			Self::Expert => "expert",
		}
	}
}
