mod message_template;
mod money;
mod next_occurrence;
mod phone;
mod recipient;
mod reminder;
mod render;
mod shared;

pub use chrono_tz::Tz;
pub use message_template::MessageTemplate;
pub use money::{format_money, ZERO_AMOUNT};
pub use next_occurrence::{compute_next, parse_weekday, InvalidScheduleError, TimeOfDay};
pub use phone::{find_phone_row, phone_digits};
pub use recipient::Recipient;
pub use reminder::{Completion, ExecutionRecord, InvalidReminderKind, Reminder, ReminderKind};
pub use render::{render_message, DEFAULT_NAME, PENDING_DATE};
pub use shared::entity::{Entity, ID};
