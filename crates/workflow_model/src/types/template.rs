//! Message templates the template step points at

use serde::{Deserialize, Serialize};

/// Delivery channel of a message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageChannel {
    Email,
    Sms,
}

/// A prebuilt patient message selectable from the step builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub channel: MessageChannel,
}

/// The templates shipped with the product.
pub fn builtin_templates() -> Vec<MessageTemplate> {
    vec![
        MessageTemplate {
            id: "patient_welcome".to_string(),
            name: "Patient welcome letter".to_string(),
            description: "Introduction to the practice for new patients".to_string(),
            channel: MessageChannel::Email,
        },
        MessageTemplate {
            id: "appointment_reminder".to_string(),
            name: "Appointment reminder".to_string(),
            description: "Reminder sent ahead of a scheduled appointment".to_string(),
            channel: MessageChannel::Sms,
        },
        MessageTemplate {
            id: "refill_notice".to_string(),
            name: "Prescription refill notice".to_string(),
            description: "Notice that a prescription is due for refill".to_string(),
            channel: MessageChannel::Email,
        },
        MessageTemplate {
            id: "missed_appointment_followup".to_string(),
            name: "Missed appointment follow-up".to_string(),
            description: "Re-engagement message after a missed appointment".to_string(),
            channel: MessageChannel::Sms,
        },
        MessageTemplate {
            id: "lab_results_ready".to_string(),
            name: "Lab results notification".to_string(),
            description: "Notification that lab results are available".to_string(),
            channel: MessageChannel::Email,
        },
    ]
}

/// Look up a builtin template by id.
pub fn find_template(id: &str) -> Option<MessageTemplate> {
    builtin_templates().into_iter().find(|t| t.id == id)
}
