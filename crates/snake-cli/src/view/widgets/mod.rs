pub(crate) use self::{board_display::*, key_binding_display::*, session_stats_display::*};

mod board_display;
mod key_binding_display;
mod session_stats_display;
