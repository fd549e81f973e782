use crate::{
    next_occurrence::compute_next,
    shared::entity::{Entity, ID},
    Recipient,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// What a `Reminder` is about, which also decides how it is scheduled.
///
/// Serialized with the names the reminder store has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderKind {
    #[serde(rename = "prueba", alias = "one_time")]
    OneTime,
    #[serde(rename = "semanal", alias = "weekly")]
    Weekly,
    #[serde(rename = "mensual", alias = "monthly")]
    Monthly,
    #[serde(rename = "revision", alias = "review")]
    Review,
    #[serde(rename = "aniversario", alias = "anniversary")]
    Anniversary,
    #[serde(rename = "cumpleanos", alias = "birthday")]
    Birthday,
}

impl ReminderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneTime => "prueba",
            Self::Weekly => "semanal",
            Self::Monthly => "mensual",
            Self::Review => "revision",
            Self::Anniversary => "aniversario",
            Self::Birthday => "cumpleanos",
        }
    }

    /// Tag written to the contact sheet next to every delivered message
    pub fn reason_tag(&self) -> String {
        self.as_str().to_uppercase()
    }

    /// Weekly and monthly reminders get a fresh `next_send_at` when they are
    /// activated again after their send time passed.
    pub fn reschedules_on_activation(&self) -> bool {
        matches!(self, Self::Weekly | Self::Monthly)
    }
}

impl Display for ReminderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("`{0}` is not a reminder kind")]
pub struct InvalidReminderKind(String);

impl FromStr for ReminderKind {
    type Err = InvalidReminderKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_lowercase().as_str() {
            "prueba" | "one_time" => Self::OneTime,
            "semanal" | "weekly" => Self::Weekly,
            "mensual" | "monthly" => Self::Monthly,
            "revision" | "review" => Self::Review,
            "aniversario" | "anniversary" => Self::Anniversary,
            "cumpleanos" | "birthday" => Self::Birthday,
            _ => return Err(InvalidReminderKind(s.to_string())),
        };
        Ok(kind)
    }
}

/// Outcome of one pass over all recipients of a `Reminder`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub at: i64,
    /// The date exactly as it was recorded when it is not a plain timestamp.
    /// `at` is 0 when that date could not be read at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_as: Option<String>,
    pub sent_count: usize,
    pub failed_count: usize,
    pub total_recipients: usize,
}

/// How an execution left the `Reminder`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Single shot, it will never be sent again
    OneTime,
    /// Deactivated, sent again only after it is toggled back on
    Recurring,
}

/// A scheduled bulk message campaign owned by one tenant
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub owner_id: String,
    pub kind: ReminderKind,
    /// The gateway session the messages are sent through
    pub instance_name: String,
    /// Message template, see `render_message`
    pub message: String,
    /// How the recipients were picked by the client, never interpreted here
    pub recipient_selection_mode: Option<Value>,
    pub recipients: Vec<Recipient>,
    pub lead_days: i64,
    pub send_weekday: Option<String>,
    /// `HH:MM`
    pub send_time: Option<String>,
    pub active: bool,
    pub created_at: i64,
    pub next_send_at: Option<i64>,
    pub last_send_at: Option<i64>,
    pub total_recipients: usize,
    pub history: Vec<ExecutionRecord>,
}

impl Reminder {
    pub fn new(
        owner_id: String,
        kind: ReminderKind,
        instance_name: String,
        message: String,
        recipients: Vec<Recipient>,
        created_at: i64,
    ) -> Self {
        Self {
            id: ID::generate("rec"),
            owner_id,
            kind,
            instance_name,
            message,
            recipient_selection_mode: None,
            total_recipients: recipients.len(),
            recipients,
            lead_days: 0,
            send_weekday: None,
            send_time: None,
            active: true,
            created_at,
            next_send_at: None,
            last_send_at: None,
            history: Vec::new(),
        }
    }

    pub fn is_due(&self, now: i64) -> bool {
        match self.next_send_at {
            Some(next_send_at) => self.active && next_send_at <= now,
            None => false,
        }
    }

    /// Next occurrence from the stored weekday and time, see `compute_next`
    pub fn compute_next_send(&self, send_at: Option<i64>, now: i64, tz: &Tz) -> Option<i64> {
        compute_next(
            self.kind,
            self.send_weekday.as_deref(),
            self.send_time.as_deref(),
            send_at,
            now,
            tz,
        )
    }

    /// Records the result of sending to every recipient and deactivates the
    /// reminder. Recurring kinds keep their `next_send_at`, they are not
    /// rescheduled until somebody toggles them on again.
    pub fn finish_execution(&mut self, sent_count: usize, failed_count: usize, at: i64) -> Completion {
        self.last_send_at = Some(at);
        self.history.push(ExecutionRecord {
            at,
            recorded_as: None,
            sent_count,
            failed_count,
            total_recipients: sent_count + failed_count,
        });
        self.active = false;

        match self.kind {
            ReminderKind::OneTime => {
                self.next_send_at = None;
                Completion::OneTime
            }
            _ => Completion::Recurring,
        }
    }

    /// Pauses or resumes the reminder. Resuming a weekly or monthly reminder
    /// whose send time already passed moves it to its next occurrence.
    pub fn toggle(&mut self, now: i64, tz: &Tz) {
        self.active = !self.active;
        if !self.active || !self.kind.reschedules_on_activation() {
            return;
        }

        let stale = match self.next_send_at {
            Some(next_send_at) => next_send_at < now,
            None => true,
        };
        if stale {
            self.next_send_at = self.compute_next_send(None, now, tz);
        }
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Bogota;

    const NOW: i64 = 1_792_418_400_000; // 2026-10-19T14:00:00Z, a Monday
    const HOUR: i64 = 60 * 60 * 1000;

    fn reminder(kind: ReminderKind) -> Reminder {
        Reminder::new(
            "owner".into(),
            kind,
            "ventas".into(),
            "Hola {nombre}".into(),
            vec![Recipient::new("Ana", "3001234567")],
            NOW - 24 * HOUR,
        )
    }

    #[test]
    fn kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&ReminderKind::Birthday).unwrap(),
            "\"cumpleanos\""
        );
        let kind: ReminderKind = serde_json::from_str("\"weekly\"").unwrap();
        assert_eq!(kind, ReminderKind::Weekly);
        assert_eq!("Semanal".parse::<ReminderKind>().unwrap(), ReminderKind::Weekly);
        assert!("diario".parse::<ReminderKind>().is_err());
        assert_eq!(ReminderKind::Weekly.reason_tag(), "SEMANAL");
    }

    #[test]
    fn due_only_when_active_and_past() {
        let mut r = reminder(ReminderKind::OneTime);
        assert!(!r.is_due(NOW));

        r.next_send_at = Some(NOW);
        assert!(r.is_due(NOW));
        assert!(!r.is_due(NOW - 1));

        r.active = false;
        assert!(!r.is_due(NOW));
    }

    #[test]
    fn one_time_completion_clears_schedule() {
        let mut r = reminder(ReminderKind::OneTime);
        r.next_send_at = Some(NOW);
        assert_eq!(r.finish_execution(1, 0, NOW), Completion::OneTime);
        assert!(!r.active);
        assert_eq!(r.next_send_at, None);
        assert_eq!(r.last_send_at, Some(NOW));
        assert_eq!(
            r.history,
            vec![ExecutionRecord {
                at: NOW,
                recorded_as: None,
                sent_count: 1,
                failed_count: 0,
                total_recipients: 1
            }]
        );
    }

    #[test]
    fn recurring_completion_keeps_schedule() {
        let mut r = reminder(ReminderKind::Weekly);
        r.next_send_at = Some(NOW - HOUR);
        assert_eq!(r.finish_execution(2, 1, NOW), Completion::Recurring);
        assert!(!r.active);
        assert_eq!(r.next_send_at, Some(NOW - HOUR));
        assert_eq!(r.history.len(), 1);
        assert_eq!(r.history[0].total_recipients, 3);
    }

    #[test]
    fn toggle_recomputes_stale_recurring_schedule() {
        let mut r = reminder(ReminderKind::Weekly);
        r.send_weekday = Some("lunes".into());
        r.send_time = Some("09:00".into());
        r.active = false;
        r.next_send_at = Some(NOW - 7 * 24 * HOUR);

        r.toggle(NOW, &Bogota);
        assert!(r.active);
        // NOW is Monday 09:00 in Bogota, the slot itself counts as passed
        assert_eq!(r.next_send_at, Some(NOW + 7 * 24 * HOUR));

        r.toggle(NOW, &Bogota);
        assert!(!r.active);
    }

    #[test]
    fn toggle_keeps_future_schedule() {
        let mut r = reminder(ReminderKind::Monthly);
        r.send_time = Some("10:00".into());
        r.active = false;
        r.next_send_at = Some(NOW + HOUR);

        r.toggle(NOW, &Bogota);
        assert!(r.active);
        assert_eq!(r.next_send_at, Some(NOW + HOUR));
    }

    #[test]
    fn toggle_does_not_reschedule_other_kinds() {
        let mut r = reminder(ReminderKind::Birthday);
        r.active = false;
        r.next_send_at = Some(NOW - HOUR);
        r.toggle(NOW, &Bogota);
        assert!(r.active);
        assert_eq!(r.next_send_at, Some(NOW - HOUR));
    }
}
