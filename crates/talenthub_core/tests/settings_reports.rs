mod common;

use common::{new_report, store};
use talenthub_core::model::{
    DisplayKey, EmailFrequency, NotificationKey, NotificationSettings, Settings,
};
use talenthub_core::{
    FetchReportsOptions, ReportService, ServiceError, SettingsService, SqliteStore, TimeFrame,
};

fn signed_in(user: &str) -> SqliteStore {
    store().with_session_user(user)
}

#[test]
fn new_user_gets_defaults() {
    let store = signed_in("user-1");
    let settings = SettingsService::new(&store).get_user_settings().unwrap();

    assert_eq!(settings, Settings::default());
    assert!(settings.notifications.push);
    assert!(settings.display.show_images);
    assert!(!settings.display.dark_mode);
    assert_eq!(settings.email.frequency, EmailFrequency::Daily);
    assert_eq!(settings.email.email, "");
}

#[test]
fn single_toggle_keeps_every_other_value() {
    let store = signed_in("user-1");
    let service = SettingsService::new(&store);

    let updated = service
        .update_notification_setting(NotificationKey::Push, false)
        .unwrap();
    assert_eq!(
        updated.notifications,
        NotificationSettings {
            push: false,
            ..NotificationSettings::default()
        }
    );
    assert_eq!(updated.display, Settings::default().display);

    let reloaded = service.get_user_settings().unwrap();
    assert_eq!(reloaded, updated);

    let dark = service.update_display_setting(DisplayKey::DarkMode, true).unwrap();
    assert!(dark.display.dark_mode);
    assert!(!dark.notifications.push);
}

#[test]
fn email_settings_are_validated() {
    let store = signed_in("user-1");
    let service = SettingsService::new(&store);

    let saved = service
        .update_email_settings("coach@club.test", EmailFrequency::Weekly)
        .unwrap();
    assert_eq!(saved.email.email, "coach@club.test");
    assert_eq!(saved.email.frequency, EmailFrequency::Weekly);

    assert!(matches!(
        service.update_email_settings("not-an-email", EmailFrequency::Monthly),
        Err(ServiceError::Validation(_))
    ));
    assert_eq!(service.get_user_settings().unwrap().email, saved.email);

    let cleared = service.update_email_settings("", EmailFrequency::Daily).unwrap();
    assert_eq!(cleared.email.email, "");
}

#[test]
fn settings_are_kept_per_user() {
    let mut store = signed_in("user-1");
    SettingsService::new(&store)
        .update_display_setting(DisplayKey::CompactView, true)
        .unwrap();

    store.set_session_user(Some("user-2".to_string()));
    assert_eq!(
        SettingsService::new(&store).get_user_settings().unwrap(),
        Settings::default()
    );
}

#[test]
fn settings_require_a_session_user() {
    let store = store();
    let service = SettingsService::new(&store);
    assert!(matches!(
        service.get_user_settings(),
        Err(ServiceError::Unauthenticated)
    ));
    assert!(matches!(
        service.update_user_settings(&Settings::default()),
        Err(ServiceError::Unauthenticated)
    ));
}

#[test]
fn reports_are_paged_newest_first_with_filtered_count() {
    let store = store();
    let reports = ReportService::new(&store);
    for days_ago in 1..=12 {
        reports
            .create_report(&new_report(&format!("Week {days_ago}"), "Performance", days_ago))
            .unwrap();
    }
    reports
        .create_report(&new_report("Budget", "Financial", 200))
        .unwrap();

    let first = reports.fetch_reports(&FetchReportsOptions::default()).unwrap();
    assert_eq!(first.count, 13);
    assert_eq!(first.data.len(), 10);
    assert_eq!(first.data[0].title, "Week 1");

    let second = reports
        .fetch_reports(&FetchReportsOptions {
            page: 2,
            ..FetchReportsOptions::default()
        })
        .unwrap();
    let titles: Vec<&str> = second.data.iter().map(|report| report.title.as_str()).collect();
    assert_eq!(titles, ["Week 11", "Week 12", "Budget"]);

    let recent = reports
        .fetch_reports(&FetchReportsOptions {
            time_frame: TimeFrame::Recent,
            page_size: 50,
            ..FetchReportsOptions::default()
        })
        .unwrap();
    assert_eq!(recent.count, 12);

    let financial = reports
        .fetch_reports(&FetchReportsOptions {
            time_frame: TimeFrame::Financial,
            ..FetchReportsOptions::default()
        })
        .unwrap();
    assert_eq!(financial.count, 1);
    assert_eq!(financial.data[0].title, "Budget");
}

#[test]
fn report_filters_combine() {
    let store = store();
    let reports = ReportService::new(&store);
    let mut swim = new_report("Swim squad review", "Performance", 5);
    swim.disciplines = vec!["Swimming".to_string()];
    swim.author = "Dana Reyes".to_string();
    reports.create_report(&swim).unwrap();
    reports
        .create_report(&new_report("Football review", "Performance", 6))
        .unwrap();
    reports
        .create_report(&new_report("Football spend", "Financial Summary", 7))
        .unwrap();

    let by_discipline = reports
        .fetch_reports(&FetchReportsOptions {
            discipline: Some("Swimming".to_string()),
            ..FetchReportsOptions::default()
        })
        .unwrap();
    assert_eq!(by_discipline.count, 1);

    let by_author = reports
        .fetch_reports(&FetchReportsOptions {
            search: Some("reyes".to_string()),
            ..FetchReportsOptions::default()
        })
        .unwrap();
    assert_eq!(by_author.data[0].title, "Swim squad review");

    let combined = reports
        .fetch_reports(&FetchReportsOptions {
            report_type: Some("financial".to_string()),
            search: Some("football".to_string()),
            ..FetchReportsOptions::default()
        })
        .unwrap();
    assert_eq!(combined.count, 1);
    assert_eq!(combined.data[0].title, "Football spend");
}

#[test]
fn created_report_is_attributed_to_session_user() {
    let signed = signed_in("user-9");
    let reports = ReportService::new(&signed);
    let report = reports
        .create_report(&new_report("Quarterly", "Performance", 1))
        .unwrap();
    assert_eq!(report.created_by.as_deref(), Some("user-9"));

    reports.delete(report.id).unwrap();
    assert!(reports.get_by_id(report.id).unwrap_err().is_not_found());

    let anonymous = store();
    let report = ReportService::new(&anonymous)
        .create_report(&new_report("Quarterly", "Performance", 1))
        .unwrap();
    assert_eq!(report.created_by, None);
}
