mod dates;
mod status_mapper;

pub use dates::{
    hours_until_deadline,
    hours_until_deadline_at,
    is_at_risk,
    is_at_risk_at,
    is_delayed,
    is_delayed_at,
    parse_date,
    DelayState,
    DEFAULT_RISK_THRESHOLD_HOURS,
};
pub use status_mapper::map_status;
