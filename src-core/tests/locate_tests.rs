use media_notes_lib::transcript::{
    group_paragraphs, locate, segment_sentences, ActiveLocation, CaptionLine, Paragraph,
    PositionTracker,
};

fn sample_paragraphs() -> Vec<Paragraph> {
    // Six one-second sentences: paragraphs [0, 3000] and [3000, 6000].
    let lines = vec![
        CaptionLine::new("One. Two. Three.", 0.0, 3000.0),
        CaptionLine::new("Four. Five. Six.", 3000.0, 3000.0),
    ];
    group_paragraphs(&segment_sentences(&lines), 3)
}

#[test]
fn locates_paragraph_and_sentence() {
    let paragraphs = sample_paragraphs();
    let location = locate(&paragraphs, 4500.0);
    assert_eq!(location.paragraph, Some(1));
    assert_eq!(location.sentence, Some(1));
}

#[test]
fn shared_paragraph_boundary_resolves_to_earlier() {
    let paragraphs = sample_paragraphs();
    let location = locate(&paragraphs, 3000.0);
    assert_eq!(location.paragraph, Some(0));
    assert_eq!(location.sentence, Some(2));
}

#[test]
fn shared_sentence_boundary_resolves_to_earlier() {
    let paragraphs = sample_paragraphs();
    let location = locate(&paragraphs, 1000.0);
    assert_eq!(location.sentence, Some(0));
}

#[test]
fn time_outside_every_paragraph_is_none() {
    let paragraphs = sample_paragraphs();
    for time in [-1.0, 6000.5, 1e9] {
        let location = locate(&paragraphs, time);
        assert_eq!(location, ActiveLocation::NONE);
        assert_eq!(location.paragraph_index_or_neg(), -1);
        assert_eq!(location.sentence_index_or_neg(), -1);
    }
}

#[test]
fn gap_between_captions_is_none() {
    let lines = vec![
        CaptionLine::new("Early.", 0.0, 1000.0),
        CaptionLine::new("Late.", 5000.0, 1000.0),
    ];
    let paragraphs = group_paragraphs(&segment_sentences(&lines), 1);
    assert_eq!(locate(&paragraphs, 3000.0), ActiveLocation::NONE);
}

#[test]
fn empty_transcript_locates_nothing() {
    assert_eq!(locate(&[], 0.0), ActiveLocation::NONE);
}

#[test]
fn tracker_only_reports_changes() {
    let paragraphs = sample_paragraphs();
    let mut tracker = PositionTracker::new();

    let first = tracker.update(&paragraphs, 100.0);
    assert_eq!(
        first,
        Some(ActiveLocation {
            paragraph: Some(0),
            sentence: Some(0)
        })
    );
    assert_eq!(tracker.update(&paragraphs, 500.0), None);
    assert_eq!(tracker.update(&paragraphs, 900.0), None);

    let next = tracker.update(&paragraphs, 1500.0);
    assert_eq!(next.and_then(|l| l.sentence), Some(1));
    assert_eq!(tracker.current().sentence, Some(1));

    tracker.reset();
    assert!(tracker.update(&paragraphs, 1500.0).is_some());
}
