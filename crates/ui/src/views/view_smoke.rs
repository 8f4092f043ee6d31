use std::sync::Arc;

use quiz_core::model::Streak;
use storage::repository::Storage;

use super::quiz::QuizIntent;
use super::test_harness::{
    FailingQuizSource, FlakyQuizSource, GatedStreakRepository, StubQuizSource, sample_quiz,
    setup_quiz_harness, setup_quiz_harness_with_storage,
};

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_shows_loading_then_options() {
    let mut harness = setup_quiz_harness(Arc::new(StubQuizSource::new(sample_quiz())));
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Loading..."), "missing placeholder in {html}");

    harness.drive_async().await;
    let html = harness.render();
    for option in ["A", "B", "C"] {
        assert!(html.contains(option), "missing option {option} in {html}");
    }
    assert!(html.contains("連続正解: 0 問"), "missing streak in {html}");
    assert!(html.contains("quiz-audio"), "missing audio element in {html}");
    assert!(
        html.contains("controlslist=\"nodownload\""),
        "missing controlslist in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn answering_does_not_retrigger_the_volume_reset() {
    let mut harness = setup_quiz_harness(Arc::new(StubQuizSource::new(sample_quiz())));
    harness.rebuild();
    harness.drive_async().await;
    assert_eq!(harness.handles.round_arrived()(), 1);

    // The volume eval is keyed on this counter; picking an option must
    // leave it alone so a user-adjusted volume survives the answer.
    harness.handles.dispatch().call(QuizIntent::Select(1));
    harness.drive_async().await;
    assert_eq!(harness.handles.round_arrived()(), 1);

    // A fresh question is the only thing that re-runs it.
    harness.handles.dispatch().call(QuizIntent::Advance);
    harness.drive_async().await;
    harness.drive_async().await;
    assert_eq!(harness.handles.round_arrived()(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn fetch_failure_shows_alert_and_no_question() {
    let mut harness = setup_quiz_harness(Arc::new(FailingQuizSource));
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Failed to fetch quiz data"),
        "missing alert in {html}"
    );
    // Still no question: the view stays on the loading placeholder.
    assert!(html.contains("Loading..."), "missing placeholder in {html}");
    assert!(!html.contains("quiz-option"), "options rendered in {html}");

    // Dismissing the alert leaves the loading view, with no retry.
    harness.handles.dispatch().call(QuizIntent::DismissAlert);
    harness.drive_async().await;
    let html = harness.render();
    assert!(!html.contains("Failed to fetch quiz data"));
    assert!(html.contains("Loading..."));
}

#[tokio::test(flavor = "current_thread")]
async fn fetch_failure_after_advance_keeps_the_question() {
    let mut harness = setup_quiz_harness(Arc::new(FlakyQuizSource::new(sample_quiz())));
    harness.rebuild();
    harness.drive_async().await;

    harness.handles.dispatch().call(QuizIntent::Select(1));
    harness.drive_async().await;

    // The refetch fails; the answered question must stay on screen
    // under the alert, advance button and all.
    harness.handles.dispatch().call(QuizIntent::Advance);
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Failed to fetch quiz data"),
        "missing alert in {html}"
    );
    assert!(html.contains("quiz-option"), "question lost in {html}");
    assert!(html.contains("次の戦場へ"), "advance lost in {html}");
    assert!(html.contains("連続正解: 1 問"), "streak lost in {html}");

    // Dismissing leaves the question; advancing again retries.
    harness.handles.dispatch().call(QuizIntent::DismissAlert);
    harness.drive_async().await;
    let html = harness.render();
    assert!(!html.contains("Failed to fetch quiz data"));
    assert!(html.contains("次の戦場へ"), "advance lost in {html}");

    harness.handles.dispatch().call(QuizIntent::Advance);
    harness.drive_async().await;
    harness.drive_async().await;
    assert!(harness.render().contains("Failed to fetch quiz data"));
}

#[tokio::test(flavor = "current_thread")]
async fn correct_answer_highlights_and_increments_streak() {
    let mut harness = setup_quiz_harness(Arc::new(StubQuizSource::new(sample_quiz())));
    harness.rebuild();
    harness.drive_async().await;

    harness.handles.dispatch().call(QuizIntent::Select(1));
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("🎉正解！"), "missing result in {html}");
    assert!(html.contains("quiz-option--correct"), "missing green in {html}");
    assert!(!html.contains("quiz-option--incorrect"));
    assert!(html.contains("連続正解: 1 問"), "missing streak in {html}");
    assert!(html.contains("disabled"), "options not disabled in {html}");
    assert!(html.contains("次の戦場へ"), "missing advance in {html}");
    assert!(html.contains("Artist Name"), "missing metadata in {html}");

    // Options are locked: a second pick changes nothing.
    harness.handles.dispatch().call(QuizIntent::Select(0));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("🎉正解！"));
    assert!(html.contains("連続正解: 1 問"));

    assert_eq!(harness.streaks.load_streak().await.unwrap(), Some(1));
}

#[tokio::test(flavor = "current_thread")]
async fn incorrect_answer_marks_both_options_and_resets_streak() {
    let storage = Storage::in_memory();
    storage.streaks.save_streak(3).await.unwrap();
    let mut harness = setup_quiz_harness_with_storage(
        Arc::new(StubQuizSource::new(sample_quiz())),
        storage,
    );
    harness.rebuild();
    harness.drive_async().await;
    assert!(harness.render().contains("連続正解: 3 問"));

    harness.handles.dispatch().call(QuizIntent::Select(0));
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("不正解…"), "missing result in {html}");
    assert!(html.contains("quiz-option--incorrect"), "missing red in {html}");
    assert!(html.contains("quiz-option--correct"), "missing green in {html}");
    assert!(html.contains("連続正解: 0 問"), "missing reset in {html}");
    assert!(!html.contains("popup-overlay"));

    assert_eq!(harness.streaks.load_streak().await.unwrap(), Some(0));
}

#[tokio::test(flavor = "current_thread")]
async fn milestone_streak_opens_and_dismisses_the_popup() {
    let storage = Storage::in_memory();
    storage.streaks.save_streak(6).await.unwrap();
    let mut harness = setup_quiz_harness_with_storage(
        Arc::new(StubQuizSource::new(sample_quiz())),
        storage,
    );
    harness.rebuild();
    harness.drive_async().await;

    harness.handles.dispatch().call(QuizIntent::Select(1));
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("popup-overlay"), "missing popup in {html}");
    assert!(html.contains("Congratulation!"), "missing title in {html}");
    assert!(
        html.contains("7問連続正解！貴方の幸運は戦巧者にふさわしい！"),
        "missing tier message in {html}"
    );
    assert_eq!(harness.handles.streak()(), Streak::new(7));

    harness
        .handles
        .dispatch()
        .call(QuizIntent::DismissAchievement);
    harness.drive_async().await;
    assert!(!harness.render().contains("popup-overlay"));
}

#[tokio::test(flavor = "current_thread")]
async fn non_milestone_streak_shows_no_popup() {
    let storage = Storage::in_memory();
    // 7 -> 8 matches the 7-tier by >= lookup, but is not a milestone.
    storage.streaks.save_streak(7).await.unwrap();
    let mut harness = setup_quiz_harness_with_storage(
        Arc::new(StubQuizSource::new(sample_quiz())),
        storage,
    );
    harness.rebuild();
    harness.drive_async().await;

    harness.handles.dispatch().call(QuizIntent::Select(1));
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("連続正解: 8 問"), "missing streak in {html}");
    assert!(!html.contains("popup-overlay"), "popup rendered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn advance_loads_the_next_question_and_keeps_the_streak() {
    let source = Arc::new(StubQuizSource::new(sample_quiz()));
    let mut harness = setup_quiz_harness(Arc::clone(&source) as Arc<dyn services::QuizSource>);
    harness.rebuild();
    harness.drive_async().await;
    assert_eq!(source.fetch_count(), 1);

    harness.handles.dispatch().call(QuizIntent::Select(1));
    harness.drive_async().await;

    harness.handles.dispatch().call(QuizIntent::Advance);
    harness.drive_async().await;
    harness.drive_async().await;

    assert_eq!(source.fetch_count(), 2);
    let html = harness.render();
    // Fresh question: selection cleared, streak untouched.
    assert!(!html.contains("quiz-option--correct"), "stale selection in {html}");
    assert!(!html.contains("次の戦場へ"), "stale advance button in {html}");
    assert!(html.contains("連続正解: 1 問"), "streak lost in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn persisted_streak_is_restored_on_mount() {
    let storage = Storage::in_memory();
    storage.streaks.save_streak(5).await.unwrap();
    let mut harness = setup_quiz_harness_with_storage(
        Arc::new(StubQuizSource::new(sample_quiz())),
        storage,
    );
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("連続正解: 5 問"), "missing restored streak in {html}");
    // Restoring must not write the initial value back.
    assert_eq!(harness.streaks.load_streak().await.unwrap(), Some(5));
}

#[tokio::test(flavor = "current_thread")]
async fn slow_restore_does_not_clobber_a_recorded_answer() {
    let repo = Arc::new(GatedStreakRepository::with_stored(5));
    let storage = Storage {
        streaks: Arc::clone(&repo) as Arc<dyn storage::repository::StreakRepository>,
    };
    let mut harness = setup_quiz_harness_with_storage(
        Arc::new(StubQuizSource::new(sample_quiz())),
        storage,
    );
    harness.rebuild();
    harness.drive_async().await;

    // Answer while the stored streak is still loading.
    harness.handles.dispatch().call(QuizIntent::Select(1));
    harness.drive_async().await;
    assert!(harness.render().contains("連続正解: 1 問"));

    // The stale load resolves now; the fresh answer must win.
    repo.release();
    harness.drive_async().await;
    assert!(harness.render().contains("連続正解: 1 問"));
    assert_eq!(repo.stored(), Some(1));
}
