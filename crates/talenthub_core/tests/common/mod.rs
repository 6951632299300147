#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveDate, Utc};
use talenthub_core::model::{
    AchievementCategory, Discipline, Gender, NewAchievement, NewCompetition, NewEvent, NewReport,
    NewSuccessStory, NewTalent, Stage, Status, Team, TalentId,
};
use talenthub_core::SqliteStore;

pub fn store() -> SqliteStore {
    SqliteStore::open_in_memory().unwrap()
}

pub fn days_from_now(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

pub fn new_talent(first_name: &str, last_name: &str, discipline: Discipline) -> NewTalent {
    NewTalent {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2009, 6, 1).unwrap(),
        gender: Gender::Female,
        discipline,
        team: Team::Academy,
        current_stage: Stage::Developing,
        contact_email: format!("{}@club.test", first_name.to_lowercase()),
        contact_phone: None,
        bio: None,
        image_url: None,
    }
}

pub fn new_event(title: &str, start_in_days: i64) -> NewEvent {
    let start_date = days_from_now(start_in_days);
    NewEvent {
        title: title.to_string(),
        description: "Training camp".to_string(),
        start_date,
        end_date: start_date + Duration::hours(6),
        location: "Main Hall".to_string(),
        disciplines: vec![Discipline::Football],
        teams: vec![Team::U18],
        status: Status::Upcoming,
        image_url: None,
    }
}

pub fn new_competition(title: &str, in_days: i64) -> NewCompetition {
    NewCompetition {
        title: title.to_string(),
        description: "Regional cup".to_string(),
        date: days_from_now(in_days),
        location: "Stadium".to_string(),
        disciplines: vec![Discipline::Athletics],
        status: Status::Upcoming,
        results: None,
        image_url: None,
    }
}

pub fn new_achievement(talent_id: TalentId, title: &str) -> NewAchievement {
    NewAchievement {
        talent_id,
        title: title.to_string(),
        description: "Regional final".to_string(),
        category: AchievementCategory::Competition,
        discipline: Discipline::Swimming,
        awarded_at: days_from_now(-10),
        image_url: None,
    }
}

pub fn new_story(talent_id: TalentId, title: &str, tags: &[&str]) -> NewSuccessStory {
    NewSuccessStory {
        talent_id,
        title: title.to_string(),
        content: "From the academy to the national team".to_string(),
        publish_date: days_from_now(-3),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        discipline: Discipline::Swimming,
        featured_image: None,
    }
}

pub fn new_report(title: &str, report_type: &str, generated_days_ago: i64) -> NewReport {
    let generated_date = days_from_now(-generated_days_ago);
    NewReport {
        title: title.to_string(),
        report_type: report_type.to_string(),
        generated_date,
        author: "Coach Rivera".to_string(),
        disciplines: vec!["Football".to_string()],
        teams: vec!["U18".to_string()],
        period_start: generated_date - Duration::days(30),
        period_end: generated_date,
        file_url: None,
    }
}
