//! Default content for new accounts
//!
//! Every user starts with four daily checklist tasks and two public starter
//! sets (one flashcard, one quiz). Seeding is duplicate-safe by title and
//! kind so re-running it (e.g. on login for older accounts) is harmless.

use chrono::Utc;
use tracing::debug;

use crate::domain::{AppResult, QuestionKind, SetKind, UserId, Visibility};
use crate::store::Store;

const DEFAULT_TASKS: [&str; 4] = [
    "Review at least 1 flashcard set",
    "Complete at least 1 quiz",
    "Create or edit a study set",
    "Check the leaderboard",
];

const STARTER_FLASHCARD_SET: &str = "Computer Science Fundamentals";
const STARTER_QUIZ_SET: &str = "Computer Science Quiz";

/// (question, answer, hint)
const STARTER_CARDS: [(&str, &str, &str); 5] = [
    (
        "Binary Search",
        "O(log n)",
        "A search algorithm that finds the position of a target value within a sorted array by repeatedly dividing the search interval in half",
    ),
    (
        "API",
        "Application Programming Interface",
        "A set of protocols and tools for building software applications that allow different applications to communicate with each other",
    ),
    (
        "Stack vs Queue",
        "Stack: LIFO (Last In First Out), Queue: FIFO (First In First Out)",
        "Stack is like a stack of plates (last one added is first removed), Queue is like a line of people (first one in is first one out)",
    ),
    (
        "Time Complexity",
        "A measure of the amount of time an algorithm takes to run as a function of the input size",
        "Common notations: O(1) constant, O(log n) logarithmic, O(n) linear, O(n²) quadratic",
    ),
    (
        "Recursion",
        "A programming technique where a function calls itself to solve a problem",
        "Must have a base case to prevent infinite loops",
    ),
];

struct StarterQuestion {
    text: &'static str,
    choices: [&'static str; 4],
    correct_index: i64,
    hint: &'static str,
}

const STARTER_QUESTIONS: [StarterQuestion; 3] = [
    StarterQuestion {
        text: "What is the time complexity of quicksort in the average case?",
        choices: ["O(n)", "O(n log n)", "O(n²)", "O(log n)"],
        correct_index: 1,
        hint: "Quicksort uses divide and conquer strategy",
    },
    StarterQuestion {
        text: "What does HTTP stand for?",
        choices: [
            "HyperText Transfer Protocol",
            "High Transfer Text Protocol",
            "HyperText Transmission Protocol",
            "High Transfer Transmission Protocol",
        ],
        correct_index: 0,
        hint: "It is the protocol of the web",
    },
    StarterQuestion {
        text: "Which data structure uses FIFO ordering?",
        choices: ["Stack", "Queue", "Tree", "Graph"],
        correct_index: 1,
        hint: "First In, First Out",
    },
];

/// Create the default daily tasks for a freshly registered user.
pub fn create_default_tasks(store: &Store, user_id: UserId) -> AppResult<()> {
    for text in DEFAULT_TASKS {
        store.insert_task(user_id, text, true)?;
    }
    Ok(())
}

/// Create the starter flashcard and quiz sets, skipping any the user already
/// has (matched by title and kind).
pub fn create_starter_sets(store: &Store, user_id: UserId) -> AppResult<()> {
    let existing = store.sets_by_creator(user_id)?;
    let now = Utc::now().to_rfc3339();

    let has_flashcard_set = existing
        .iter()
        .any(|s| s.title == STARTER_FLASHCARD_SET && s.kind == SetKind::Flashcard);
    if !has_flashcard_set {
        let set = store.insert_set(
            STARTER_FLASHCARD_SET,
            Some("Essential computer science concepts and terminology"),
            Some("Computer Science"),
            Visibility::Public,
            SetKind::Flashcard,
            user_id,
            &now,
        )?;
        for (ord, (question, answer, hint)) in STARTER_CARDS.iter().enumerate() {
            store.insert_card(set.id, question, answer, Some(hint), ord as i64)?;
        }
    }

    let has_quiz_set = existing
        .iter()
        .any(|s| s.title == STARTER_QUIZ_SET && s.kind == SetKind::Quiz);
    if !has_quiz_set {
        let set = store.insert_set(
            STARTER_QUIZ_SET,
            Some("Test your knowledge of computer science fundamentals"),
            Some("Computer Science"),
            Visibility::Public,
            SetKind::Quiz,
            user_id,
            &now,
        )?;
        for (ord, q) in STARTER_QUESTIONS.iter().enumerate() {
            let choices: Vec<String> = q.choices.iter().map(|c| c.to_string()).collect();
            store.insert_question(
                set.id,
                QuestionKind::Mcq,
                q.text,
                Some(&choices),
                Some(q.correct_index),
                None,
                Some(q.hint),
                ord as i64,
            )?;
        }
    }

    debug!(user_id, "starter content seeded");
    Ok(())
}
