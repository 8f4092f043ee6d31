use dioxus::document::eval;
use dioxus::prelude::*;

use quiz_core::model::{Streak, achievement_for};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{OptionHighlight, QuizVm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

static BACKGROUND: Asset = asset!("/assets/background.jpg");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum QuizIntent {
    Select(usize),
    Advance,
    DismissAchievement,
    DismissAlert,
}

#[derive(Clone, Debug, PartialEq)]
struct OptionRender {
    index: usize,
    label: String,
    highlight: OptionHighlight,
}

#[derive(Clone, Debug, PartialEq)]
struct RoundRender {
    audio_url: String,
    options: Vec<OptionRender>,
    locked: bool,
    correct: Option<bool>,
    artist_info: Option<String>,
    scene_info: Option<String>,
}

impl RoundRender {
    fn from_vm(vm: &QuizVm) -> Self {
        let quiz = vm.quiz();
        Self {
            audio_url: quiz.audio_url().to_string(),
            options: quiz
                .options()
                .iter()
                .enumerate()
                .map(|(index, label)| OptionRender {
                    index,
                    label: label.clone(),
                    highlight: vm.highlight(index),
                })
                .collect(),
            locked: vm.locked(),
            correct: vm.is_correct(),
            artist_info: quiz.artist_info().map(str::to_string),
            scene_info: quiz.scene_info().map(str::to_string),
        }
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_source = ctx.quiz_source();
    let streak_service = ctx.streak_service();

    let mut quiz_number = use_signal(|| 0_u32);
    let vm = use_signal(|| None::<QuizVm>);
    let streak = use_signal(Streak::default);
    let streak_dirty = use_signal(|| false);
    let show_achievement = use_signal(|| false);
    let alert_open = use_signal(|| false);
    let round_arrived = use_signal(|| 0_u32);

    // Restore the persisted streak once on mount; a reload must not
    // cost the player a nonzero streak. If an answer lands before the
    // load resolves, the stored value is stale and must not win.
    let streak_service_for_restore = streak_service.clone();
    let _streak_restore = use_resource(move || {
        let streak_service = streak_service_for_restore.clone();
        let mut streak = streak;
        async move {
            let restored = streak_service.restore().await;
            if !*streak_dirty.peek() {
                streak.set(restored);
            }
        }
    });

    // One fetch per quiz number. A stale in-flight response is
    // applied as current; advancing does not cancel it.
    let quiz_source_for_resource = quiz_source.clone();
    let resource = use_resource(move || {
        let quiz_source = quiz_source_for_resource.clone();
        let _number = quiz_number();
        let mut vm = vm;
        let mut alert_open = alert_open;
        let mut round_arrived = round_arrived;
        async move {
            match quiz_source.fetch_quiz().await {
                Ok(quiz) => {
                    vm.set(Some(QuizVm::new(quiz)));
                    alert_open.set(false);
                    round_arrived.set(round_arrived.peek().wrapping_add(1));
                    Ok(())
                }
                Err(err) => {
                    log::error!("quiz fetch failed: {err}");
                    // The current question stays up; the player can
                    // answer it or advance again to retry the fetch.
                    alert_open.set(true);
                    Err(ViewError::FetchFailed)
                }
            }
        }
    });
    let state = view_state_from_resource(&resource);

    // The next render after a quiz arrives: start playback quiet.
    // Keyed on arrival only, so answering never resets a volume the
    // player has adjusted.
    use_effect(move || {
        if round_arrived() > 0 {
            let _ = eval(
                "const audio = document.getElementById('quiz-audio'); \
                 if (audio) { audio.volume = 0.3; }",
            );
        }
    });

    let dispatch_intent = {
        let streak_service = streak_service.clone();
        use_callback(move |intent: QuizIntent| {
            let mut vm = vm;
            let mut streak = streak;
            let mut streak_dirty = streak_dirty;
            let mut show_achievement = show_achievement;
            let mut quiz_number = quiz_number;
            let mut alert_open = alert_open;

            match intent {
                QuizIntent::Select(index) => {
                    let outcome = {
                        let current = streak();
                        let mut guard = vm.write();
                        guard.as_mut().and_then(|vm| vm.select(index, current))
                    };
                    let Some(outcome) = outcome else {
                        return;
                    };

                    streak.set(outcome.streak);
                    streak_dirty.set(true);
                    show_achievement.set(outcome.achievement.is_some());

                    let streak_service = streak_service.clone();
                    spawn(async move {
                        streak_service.record(outcome.streak).await;
                    });
                }
                QuizIntent::Advance => {
                    quiz_number.set(quiz_number() + 1);
                }
                QuizIntent::DismissAchievement => {
                    show_achievement.set(false);
                }
                QuizIntent::DismissAlert => {
                    alert_open.set(false);
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, streak, round_arrived);
            }
        }
    }

    let round = vm.read().as_ref().map(RoundRender::from_vm);
    let streak_value = streak().value();

    rsx! {
        div {
            class: "quiz-page",
            style: "background-image: url({BACKGROUND});",
            if show_achievement() {
                AchievementPopup {
                    streak: streak_value,
                    on_close: move |()| dispatch_intent.call(QuizIntent::DismissAchievement),
                }
            }
            if let ViewState::Error(err) = state {
                if alert_open() {
                    div { class: "alert-overlay",
                        div { class: "alert",
                            p { "{err.message()}" }
                            button {
                                class: "alert-dismiss",
                                r#type: "button",
                                onclick: move |_| dispatch_intent.call(QuizIntent::DismissAlert),
                                "OK"
                            }
                        }
                    }
                }
            }
            match round {
                None => rsx! {
                    div { class: "quiz-loading",
                        p { "Loading..." }
                    }
                },
                Some(round) => {
                    let option_buttons = round.options.iter().map(|option| {
                        let index = option.index;
                        let label = option.label.clone();
                        let highlight = match option.highlight {
                            OptionHighlight::None => "",
                            OptionHighlight::Correct => "quiz-option--correct",
                            OptionHighlight::Incorrect => "quiz-option--incorrect",
                        };
                        let locked = round.locked;
                        rsx! {
                            button {
                                class: "quiz-option {highlight}",
                                r#type: "button",
                                disabled: locked,
                                onclick: move |_| dispatch_intent.call(QuizIntent::Select(index)),
                                "{label}"
                            }
                        }
                    });
                    let artist = round.artist_info.clone().unwrap_or_default();
                    let scene = round.scene_info.clone().unwrap_or_default();
                    let meta_class = if round.locked {
                        "quiz-meta quiz-meta--revealed"
                    } else {
                        "quiz-meta"
                    };
                    rsx! {
                        div { class: "quiz-card",
                            h2 { class: "quiz-title", "🎵 イントロ72 🎵" }
                            h3 { class: "quiz-streak", "連続正解: {streak_value} 問" }
                            div { class: "quiz-streak-banner",
                                if streak_value >= 2 {
                                    p { "✨現在{streak_value}問連続正解中！✨" }
                                }
                            }

                            audio {
                                id: "quiz-audio",
                                class: "quiz-audio",
                                controls: true,
                                "controlslist": "nodownload",
                                src: "{round.audio_url}",
                            }

                            div { class: "quiz-options",
                                {option_buttons}
                            }

                            div { class: "quiz-result",
                                match round.correct {
                                    Some(true) => rsx! {
                                        h3 { class: "quiz-result-text quiz-result-text--correct", "🎉正解！" }
                                    },
                                    Some(false) => rsx! {
                                        h3 { class: "quiz-result-text quiz-result-text--incorrect", "不正解…" }
                                    },
                                    None => rsx! {
                                        h3 { class: "quiz-result-text quiz-result-text--hidden", "　" }
                                    },
                                }
                                div {
                                    class: "{meta_class}",
                                    p { class: "quiz-meta-line",
                                        strong { "Artist:" }
                                        span { if round.locked { "{artist}" } else { "　" } }
                                    }
                                    p { class: "quiz-meta-line",
                                        strong { "Scene:" }
                                        span { if round.locked { "{scene}" } else { "　" } }
                                    }
                                }
                            }

                            div { class: "quiz-advance",
                                if round.correct.is_some() {
                                    button {
                                        class: "quiz-advance-button",
                                        r#type: "button",
                                        onclick: move |_| dispatch_intent.call(QuizIntent::Advance),
                                        "次の戦場へ ▶️"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Modal overlay shown when the streak lands exactly on a reward
/// threshold. Presentation comes from the `>=` tier lookup; the
/// decision to show the popup was already made by the exact-match
/// gate in the answer evaluator.
#[component]
fn AchievementPopup(streak: u32, on_close: EventHandler<()>) -> Element {
    let Some(achievement) = achievement_for(streak) else {
        return rsx! {};
    };

    rsx! {
        div { class: "popup-overlay",
            div {
                class: "popup",
                style: "box-shadow: 0 0 20px {achievement.color}; border: 3px solid {achievement.border_color};",
                h2 { class: "popup-title", style: "color: {achievement.color};", "{achievement.title}" }
                p { class: "popup-streak",
                    strong { "{streak}問連続正解達成！" }
                }
                p { class: "popup-message", "{achievement.message}" }
                button {
                    class: "popup-continue",
                    r#type: "button",
                    style: "background-color: {achievement.color};",
                    onclick: move |_| on_close.call(()),
                    "Continue"
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    streak: Rc<RefCell<Option<Signal<Streak>>>>,
    round_arrived: Rc<RefCell<Option<Signal<u32>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<QuizIntent>,
        streak: Signal<Streak>,
        round_arrived: Signal<u32>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.streak.borrow_mut() = Some(streak);
        *self.round_arrived.borrow_mut() = Some(round_arrived);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn streak(&self) -> Signal<Streak> {
        (*self.streak.borrow()).expect("quiz streak registered")
    }

    pub(crate) fn round_arrived(&self) -> Signal<u32> {
        (*self.round_arrived.borrow()).expect("quiz round counter registered")
    }
}
