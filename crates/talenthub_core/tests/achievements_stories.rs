mod common;

use common::{days_from_now, new_achievement, new_story, new_talent, store};
use talenthub_core::model::{AchievementCategory, AchievementPatch, Discipline, SuccessStoryPatch};
use talenthub_core::{AchievementService, ServiceError, SuccessStoryService, TalentService};
use uuid::Uuid;

#[test]
fn achievements_are_listed_newest_first_per_talent() {
    let store = store();
    let ana = TalentService::new(&store)
        .create(&new_talent("Ana", "Silva", Discipline::Swimming))
        .unwrap();
    let achievements = AchievementService::new(&store);

    let mut older = new_achievement(ana.id, "County record");
    older.awarded_at = days_from_now(-60);
    older.category = AchievementCategory::Record;
    achievements.create(&older).unwrap();
    achievements.create(&new_achievement(ana.id, "Regional gold")).unwrap();

    let titles: Vec<String> = achievements
        .get_achievements_by_talent(ana.id)
        .unwrap()
        .into_iter()
        .map(|achievement| achievement.title)
        .collect();
    assert_eq!(titles, ["Regional gold", "County record"]);

    assert_eq!(
        achievements
            .get_achievements_by_category(AchievementCategory::Record)
            .unwrap()[0]
            .title,
        "County record"
    );
    assert_eq!(
        achievements
            .get_achievements_by_discipline(Discipline::Swimming)
            .unwrap()
            .len(),
        2
    );
    assert_eq!(achievements.search("GOLD").unwrap().len(), 1);
}

#[test]
fn achievement_requires_existing_talent() {
    let store = store();
    let err = AchievementService::new(&store)
        .create(&new_achievement(Uuid::new_v4(), "Orphan"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Storage(_)));
}

#[test]
fn achievement_update_and_delete() {
    let store = store();
    let ana = TalentService::new(&store)
        .create(&new_talent("Ana", "Silva", Discipline::Swimming))
        .unwrap();
    let achievements = AchievementService::new(&store);
    let gold = achievements.create(&new_achievement(ana.id, "Gold")).unwrap();

    let patch = AchievementPatch {
        title: Some("Gold 50m".to_string()),
        ..AchievementPatch::default()
    };
    assert_eq!(achievements.update(gold.id, &patch).unwrap().title, "Gold 50m");

    achievements.delete(gold.id).unwrap();
    assert!(achievements.get_by_id(gold.id).unwrap_err().is_not_found());
    assert!(achievements.get_all().unwrap().is_empty());
}

#[test]
fn stories_match_tags_exactly() {
    let store = store();
    let ana = TalentService::new(&store)
        .create(&new_talent("Ana", "Silva", Discipline::Swimming))
        .unwrap();
    let stories = SuccessStoryService::new(&store);
    stories
        .create(&new_story(ana.id, "Rising star", &["youth", "national team"]))
        .unwrap();
    stories
        .create(&new_story(ana.id, "Comeback", &["youthful"]))
        .unwrap();

    let tagged = stories.get_success_stories_by_tag("youth").unwrap();
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].title, "Rising star");
    assert!(stories.get_success_stories_by_tag("team").unwrap().is_empty());
    assert_eq!(stories.get_success_stories_by_talent(ana.id).unwrap().len(), 2);
    assert_eq!(
        stories
            .get_success_stories_by_discipline(Discipline::Swimming)
            .unwrap()
            .len(),
        2
    );
    assert_eq!(stories.search("comeback").unwrap().len(), 1);
}

#[test]
fn story_tags_can_be_replaced() {
    let store = store();
    let ana = TalentService::new(&store)
        .create(&new_talent("Ana", "Silva", Discipline::Swimming))
        .unwrap();
    let stories = SuccessStoryService::new(&store);
    let story = stories.create(&new_story(ana.id, "Rising star", &["youth"])).unwrap();

    let patch = SuccessStoryPatch {
        tags: Some(vec!["elite".to_string()]),
        ..SuccessStoryPatch::default()
    };
    let updated = stories.update(story.id, &patch).unwrap();
    assert_eq!(updated.tags, ["elite"]);
    assert!(stories.get_success_stories_by_tag("youth").unwrap().is_empty());
}
