use serde::Serialize;

use doctor_cell::models::CatalogMetrics;
use shared_models::auth::UserProfile;

pub const GREETING_SUBTITLE: &str = "We are glad to have you here. Let's make today a health one!";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub greeting: String,
    pub subtitle: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    pub active_appointments: usize,
    pub total_doctors: usize,
    pub available_doctors: usize,
    pub specialties: usize,
    pub cards: Vec<SummaryCard>,
}

impl DashboardSummary {
    pub fn build(user: Option<UserProfile>, appointment_count: usize, metrics: CatalogMetrics) -> Self {
        let greeting = match &user {
            Some(user) => format!("Welcome to Doctor point, {}!", user.user_name),
            None => "Welcome to Doctor point!".to_string(),
        };

        let cards = vec![
            SummaryCard { title: "Active Appointments", value: appointment_count },
            SummaryCard { title: "Total Doctors", value: metrics.total },
            SummaryCard { title: "Available Doctors", value: metrics.available },
            SummaryCard { title: "Specialties", value: metrics.specialties },
        ];

        Self {
            greeting,
            subtitle: GREETING_SUBTITLE,
            user,
            active_appointments: appointment_count,
            total_doctors: metrics.total,
            available_doctors: metrics.available,
            specialties: metrics.specialties,
            cards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_models::auth::UserId;

    fn metrics() -> CatalogMetrics {
        CatalogMetrics { total: 8, available: 7, specialties: 6 }
    }

    #[test]
    fn greets_the_signed_in_user() {
        let user = UserProfile {
            id: UserId::Text("u1".into()),
            user_name: "Alice".into(),
            email: "a@x.com".into(),
            role: "user".into(),
        };
        let summary = DashboardSummary::build(Some(user), 2, metrics());
        assert_eq!(summary.greeting, "Welcome to Doctor point, Alice!");
        assert_eq!(summary.active_appointments, 2);
        assert_eq!(summary.cards[2], SummaryCard { title: "Available Doctors", value: 7 });
    }

    #[test]
    fn anonymous_summary_still_counts() {
        let summary = DashboardSummary::build(None, 0, metrics());
        assert_eq!(summary.greeting, "Welcome to Doctor point!");
        assert_eq!(summary.total_doctors, 8);
        assert_eq!(summary.specialties, 6);
    }
}
