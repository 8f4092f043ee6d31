use dioxus::prelude::*;
use dioxus_router::Routable;

use crate::views::QuizView;

// One page, one route. The quiz has no further navigation.
#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/", QuizView)] Quiz {},
}
