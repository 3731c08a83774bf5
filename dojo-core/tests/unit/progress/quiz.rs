use super::*;

fn question(prompt: &str, correct: usize) -> QuizQuestion {
    QuizQuestion {
        question: prompt.to_string(),
        options: (0..3)
            .map(|i| QuizOption {
                text: format!("option {i}"),
                correct: i == correct,
            })
            .collect(),
        explanation: format!("{prompt} explained"),
    }
}

fn three_questions(id: Option<&str>) -> Quiz {
    Quiz {
        id: id.map(str::to_string),
        questions: vec![question("q1", 0), question("q2", 1), question("q3", 2)],
    }
}

#[test]
fn answer_is_recorded_and_index_waits_for_next() {
    let mut s = QuizSession::restore(three_questions(Some("l1")), ProgressStore::in_memory()).unwrap();
    assert_eq!(s.phase(), QuizPhase::Answering);
    assert_eq!(s.select(2), Some(false));
    assert!(s.next());

    assert_eq!(s.select(1), Some(true));
    assert!(s.state().results[1]);
    assert_eq!(s.state().current_index, 1);
    assert_eq!(
        s.phase(),
        QuizPhase::Answered {
            selected: 1,
            correct: true
        }
    );
    assert_eq!(s.explanation(), Some("q2 explained"));
    assert!(s.next());
    assert_eq!(s.state().current_index, 2);
}

#[test]
fn second_selection_is_ignored() {
    let mut s = QuizSession::restore(three_questions(None), ProgressStore::in_memory()).unwrap();
    assert_eq!(s.select(0), Some(true));
    assert_eq!(s.select(1), None);
    assert_eq!(s.state().results, vec![true]);
    assert!(!QuizSession::restore(three_questions(None), ProgressStore::in_memory())
        .unwrap()
        .next());
}

#[test]
fn finishing_reports_score() {
    let mut s = QuizSession::restore(three_questions(Some("l1")), ProgressStore::in_memory()).unwrap();
    for pick in [0, 1, 0] {
        s.select(pick).unwrap();
        s.next();
    }
    assert_eq!(s.phase(), QuizPhase::Finished);
    assert!(s.current_question().is_none());
    assert_eq!(s.select(0), None);
    let summary = s.summary().unwrap();
    assert_eq!(summary.correct, s.state().correct_count());
    assert_eq!(summary.correct, 2);
    assert_eq!(summary.to_string(), "2 из 3 правильных");
    assert_eq!(summary.verdict(), Verdict::Good);
    assert_eq!(s.progress(), 1.0);
}

#[test]
fn restart_clears_storage_and_memory() {
    let store = ProgressStore::in_memory();
    let mut s = QuizSession::restore(three_questions(Some("l1")), store.clone()).unwrap();
    s.select(0);
    s.next();
    assert!(store.load::<QuizState>("quiz-progress-l1").is_some());

    s.restart();
    assert_eq!(store.load::<QuizState>("quiz-progress-l1"), None);
    assert_eq!(*s.state(), QuizState::default());
    assert_eq!(s.phase(), QuizPhase::Answering);
}

#[test]
fn progress_is_resumed_at_first_unanswered_question() {
    let store = ProgressStore::in_memory();
    {
        let mut s = QuizSession::restore(three_questions(Some("l1")), store.clone()).unwrap();
        s.select(0);
    }
    let s = QuizSession::restore(three_questions(Some("l1")), store.clone()).unwrap();
    assert_eq!(s.state().current_index, 1);
    assert_eq!(s.state().results, vec![true]);
    assert_eq!(s.current_question().unwrap().question, "q2");
    assert!((s.progress() - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn fully_answered_snapshot_restores_finished() {
    let store = ProgressStore::in_memory();
    store.save(
        "quiz-progress-l1",
        &QuizState {
            current_index: 2,
            results: vec![true, true, true],
        },
    );
    let s = QuizSession::restore(three_questions(Some("l1")), store).unwrap();
    assert_eq!(s.phase(), QuizPhase::Finished);
    assert_eq!(s.summary().unwrap().verdict(), Verdict::Excellent);
}

#[test]
fn oversized_or_malformed_snapshots_start_fresh() {
    let store = ProgressStore::in_memory();
    store.save(
        "quiz-progress-l1",
        &QuizState {
            current_index: 4,
            results: vec![true; 4],
        },
    );
    let s = QuizSession::restore(three_questions(Some("l1")), store.clone()).unwrap();
    assert_eq!(*s.state(), QuizState::default());

    store.save("quiz-progress-l1", &serde_json::json!({"currentIndex": -1, "results": 3}));
    let s = QuizSession::restore(three_questions(Some("l1")), store).unwrap();
    assert_eq!(*s.state(), QuizState::default());
}

#[test]
fn storage_key_prefers_explicit_id() {
    let quiz = three_questions(Some("anchors"));
    assert_eq!(quiz.storage_key(), "quiz-progress-anchors");

    let long = Quiz {
        id: Some(String::new()),
        questions: vec![question("Что делает Canvas Scaler в режиме Scale With Screen Size?", 0)],
    };
    assert_eq!(
        long.storage_key(),
        "quiz-progress-1-Что делает Canvas Scaler в реж"
    );
}

#[test]
fn empty_quizzes_are_rejected() {
    let empty = Quiz {
        id: None,
        questions: vec![],
    };
    assert!(QuizSession::restore(empty, ProgressStore::in_memory()).is_err());

    let no_options = Quiz {
        id: None,
        questions: vec![QuizQuestion {
            question: "q".to_string(),
            options: vec![],
            explanation: String::new(),
        }],
    };
    assert!(no_options.validate().is_err());
}

#[test]
fn state_uses_camel_case_json() {
    let json = serde_json::to_string(&QuizState {
        current_index: 1,
        results: vec![false],
    })
    .unwrap();
    assert_eq!(json, r#"{"currentIndex":1,"results":[false]}"#);
}

#[test]
fn verdict_thresholds() {
    let v = |correct, total| QuizSummary { correct, total }.verdict();
    assert_eq!(v(4, 4), Verdict::Excellent);
    assert_eq!(v(2, 4), Verdict::Good);
    assert_eq!(v(1, 4), Verdict::TryAgain);
    assert_eq!(Verdict::TryAgain.message(), "Попробуйте пройти квиз ещё раз.");
}
