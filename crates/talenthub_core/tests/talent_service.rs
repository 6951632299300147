mod common;

use common::{new_achievement, new_competition, new_story, new_talent, store};
use serde_json::json;
use talenthub_core::model::{Discipline, Stage, TalentPatch, Team};
use talenthub_core::{
    AchievementService, CompetitionService, ServiceError, StoreError, SuccessStoryService,
    TalentService,
};
use uuid::Uuid;

#[test]
fn created_talent_is_found_by_case_insensitive_search() {
    let store = store();
    let talents = TalentService::new(&store);

    let ana = talents
        .create(&new_talent("Ana", "Silva", Discipline::Swimming))
        .unwrap();
    talents
        .create(&new_talent("Bruno", "Costa", Discipline::Football))
        .unwrap();

    assert_eq!(ana.first_name, "Ana");
    assert_eq!(ana.created_at, ana.updated_at);

    let hits = talents.search("ana").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, ana.id);

    assert_eq!(talents.search("CLUB.TEST").unwrap().len(), 2);
    assert!(talents.search("nobody").unwrap().is_empty());
}

#[test]
fn search_treats_wildcards_literally() {
    let store = store();
    let talents = TalentService::new(&store);
    talents
        .create(&new_talent("Ana", "Silva", Discipline::Swimming))
        .unwrap();

    assert!(talents.search("%").unwrap().is_empty());
    assert!(talents.search("_na").unwrap().is_empty());
}

#[test]
fn search_folds_case_beyond_ascii() {
    let store = store();
    let talents = TalentService::new(&store);
    let mut emile = new_talent("Émile", "Ndayisaba", Discipline::Athletics);
    emile.contact_email = "en@club.test".to_string();
    let emile = talents.create(&emile).unwrap();

    for text in ["Émile", "émile", "ÉMILE", "ndayisaba"] {
        let hits = talents.search(text).unwrap();
        assert_eq!(hits.len(), 1, "search {text}");
        assert_eq!(hits[0].id, emile.id);
    }
}

#[test]
fn invalid_payload_reports_every_field_and_writes_nothing() {
    let store = store();
    let talents = TalentService::new(&store);

    let err = talents
        .create_value(&json!({
            "firstName": "",
            "lastName": "Silva",
            "dateOfBirth": "2010-13-40",
            "gender": "Female",
            "discipline": "Chess",
            "team": "Academy",
            "currentStage": "Beginner",
            "contactEmail": "not-an-email",
        }))
        .unwrap_err();

    match err {
        ServiceError::Validation(validation) => {
            for field in ["firstName", "dateOfBirth", "discipline", "contactEmail"] {
                assert!(validation.has_field(field), "missing issue for {field}");
            }
            assert!(!validation.has_field("lastName"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(talents.get_all().unwrap().is_empty());
}

#[test]
fn list_is_ordered_by_last_then_first_name() {
    let store = store();
    let talents = TalentService::new(&store);
    for (first, last) in [("Zoe", "Adams"), ("Ana", "Silva"), ("Ada", "Adams")] {
        talents
            .create(&new_talent(first, last, Discipline::Karate))
            .unwrap();
    }

    let names: Vec<String> = talents
        .get_all()
        .unwrap()
        .into_iter()
        .map(|talent| talent.full_name())
        .collect();
    assert_eq!(names, ["Ada Adams", "Zoe Adams", "Ana Silva"]);
}

#[test]
fn partial_update_keeps_other_fields() {
    let store = store();
    let talents = TalentService::new(&store);
    let ana = talents
        .create(&new_talent("Ana", "Silva", Discipline::Swimming))
        .unwrap();

    let patch = TalentPatch {
        current_stage: Some(Stage::Elite),
        bio: Some("Butterfly specialist".to_string()),
        ..TalentPatch::default()
    };
    let updated = talents.update(ana.id, &patch).unwrap();

    assert_eq!(updated.current_stage, Stage::Elite);
    assert_eq!(updated.bio.as_deref(), Some("Butterfly specialist"));
    assert_eq!(updated.first_name, "Ana");
    assert_eq!(updated.created_at, ana.created_at);
    assert!(updated.updated_at >= ana.updated_at);

    let cleared = talents.update_value(ana.id, &json!({ "bio": null })).unwrap();
    assert_eq!(cleared.bio, None);
}

#[test]
fn empty_patch_and_unknown_id_are_rejected() {
    let store = store();
    let talents = TalentService::new(&store);
    let ana = talents
        .create(&new_talent("Ana", "Silva", Discipline::Swimming))
        .unwrap();

    assert!(matches!(
        talents.update(ana.id, &TalentPatch::default()),
        Err(ServiceError::Validation(_))
    ));

    let patch = TalentPatch {
        bio: Some("x".to_string()),
        ..TalentPatch::default()
    };
    let err = talents.update(Uuid::new_v4(), &patch).unwrap_err();
    assert!(err.is_not_found());
    assert!(talents.get_by_id(Uuid::new_v4()).unwrap_err().is_not_found());
}

#[test]
fn finders_filter_by_discipline_team_and_stage() {
    let store = store();
    let talents = TalentService::new(&store);
    talents
        .create(&new_talent("Ana", "Silva", Discipline::Swimming))
        .unwrap();
    let mut senior = new_talent("Bruno", "Costa", Discipline::Football);
    senior.team = Team::Senior;
    senior.current_stage = Stage::Professional;
    talents.create(&senior).unwrap();

    assert_eq!(talents.find_by_discipline(Discipline::Swimming).unwrap().len(), 1);
    assert!(talents.find_by_discipline(Discipline::Karate).unwrap().is_empty());
    assert_eq!(talents.find_by_team(Team::Senior).unwrap()[0].first_name, "Bruno");
    assert_eq!(talents.find_by_stage(Stage::Developing).unwrap()[0].first_name, "Ana");
}

#[test]
fn all_details_aggregate_collects_related_records() {
    let store = store();
    let talents = TalentService::new(&store);
    let competitions = CompetitionService::new(&store);
    let ana = talents
        .create(&new_talent("Ana", "Silva", Discipline::Swimming))
        .unwrap();
    let other = talents
        .create(&new_talent("Bea", "Lima", Discipline::Swimming))
        .unwrap();

    AchievementService::new(&store)
        .create(&new_achievement(ana.id, "Gold 100m"))
        .unwrap();
    AchievementService::new(&store)
        .create(&new_achievement(other.id, "Silver 200m"))
        .unwrap();
    SuccessStoryService::new(&store)
        .create(&new_story(ana.id, "Rising star", &["youth"]))
        .unwrap();
    let cup = competitions.create(&new_competition("Spring Cup", 7)).unwrap();
    competitions.add_participant(cup.id, ana.id).unwrap();
    competitions.add_participant(cup.id, other.id).unwrap();

    let details = talents.get_talent_with_all_details(ana.id).unwrap();
    assert_eq!(details.talent.id, ana.id);
    assert_eq!(details.achievements.len(), 1);
    assert_eq!(details.achievements[0].title, "Gold 100m");
    assert_eq!(details.success_stories.len(), 1);
    assert_eq!(details.competitions.len(), 1);
    assert_eq!(details.competitions[0].participants.len(), 2);

    let (_, achievements) = talents.get_talent_with_achievements(other.id).unwrap();
    assert_eq!(achievements[0].title, "Silver 200m");
    let (_, stories) = talents.get_talent_with_success_stories(other.id).unwrap();
    assert!(stories.is_empty());

    let encoded = serde_json::to_value(&details).unwrap();
    assert_eq!(encoded["firstName"], "Ana");
    assert!(encoded["successStories"].is_array());
}

#[test]
fn aggregate_of_missing_talent_is_not_found() {
    let store = store();
    let err = TalentService::new(&store)
        .get_talent_with_all_details(Uuid::new_v4())
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn discipline_distribution_lists_every_discipline() {
    let store = store();
    let talents = TalentService::new(&store);
    talents
        .create(&new_talent("Ana", "Silva", Discipline::Swimming))
        .unwrap();
    talents
        .create(&new_talent("Bea", "Lima", Discipline::Swimming))
        .unwrap();
    talents
        .create(&new_talent("Caio", "Reis", Discipline::Karate))
        .unwrap();

    let distribution = talents.discipline_distribution().unwrap();
    assert_eq!(distribution.len(), Discipline::ALL.len());
    assert!(distribution.contains(&(Discipline::Swimming, 2)));
    assert!(distribution.contains(&(Discipline::Karate, 1)));
    assert!(distribution.contains(&(Discipline::Orchestra, 0)));
}

#[test]
fn deleting_talent_with_achievements_fails_but_enrollments_cascade() {
    let store = store();
    let talents = TalentService::new(&store);
    let competitions = CompetitionService::new(&store);
    let ana = talents
        .create(&new_talent("Ana", "Silva", Discipline::Swimming))
        .unwrap();
    let bea = talents
        .create(&new_talent("Bea", "Lima", Discipline::Swimming))
        .unwrap();
    AchievementService::new(&store)
        .create(&new_achievement(ana.id, "Gold 100m"))
        .unwrap();

    match talents.delete(ana.id).unwrap_err() {
        ServiceError::Storage(StoreError::Backend(err)) => {
            assert!(err.to_string().contains("FOREIGN KEY"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(talents.get_by_id(ana.id).is_ok());

    let cup = competitions.create(&new_competition("Spring Cup", 7)).unwrap();
    competitions.add_participant(cup.id, bea.id).unwrap();
    talents.delete(bea.id).unwrap();
    assert!(competitions.get_participants(cup.id).unwrap().is_empty());
}
