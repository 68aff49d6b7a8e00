mod instant;

pub use instant::{
    format_for_display, format_time_for_display, round_up_to_quarter, to_local_instant,
    to_server_date_string, to_server_time_string, LocalInstant, ServerCalendarPoint,
};
