//! Reference scenarios for scoring and binning

use gridsent_core::{
    format_score, AggregateRow, Aggregator, GridCell, GridIndex, Lexicon, Point, Record,
    SentimentMatcher,
};

fn fold(records: &[Record], lexicon: &Lexicon, grid: &GridIndex) -> Aggregator {
    let matcher = SentimentMatcher::new(lexicon);
    let mut table = Aggregator::for_grid(grid);
    for record in records {
        if let Some(cell) = grid.resolve(record.point) {
            table.record(&cell.id, matcher.score(&record.text));
        }
    }
    table
}

#[test]
fn test_not_good_is_one_phrase() {
    let lexicon = Lexicon::parse("good 3\nnot good -2\n").unwrap();
    let grid = GridIndex::new(vec![GridCell::new("A1", 0.0, 10.0, 0.0, 10.0)]).unwrap();

    let table = fold(&[Record::new((5.0, 5.0), "this is not good!")], &lexicon, &grid);

    assert_eq!(table.get("A1"), Some(&AggregateRow::new(1, -2)));
    assert_eq!(format_score(table.get("A1").unwrap().total_score), "-2");
}

#[test]
fn test_unlocated_records_are_dropped() {
    let lexicon = Lexicon::parse("good 3\n").unwrap();
    let grid = GridIndex::new(vec![
        GridCell::new("A1", 0.0, 10.0, 0.0, 10.0),
        GridCell::new("A2", 10.0, 20.0, 0.0, 10.0),
    ])
    .unwrap();

    let records = [
        Record::new((10.0, 5.0), "good"),
        Record::new((30.0, 5.0), "good good"),
        Record::new((12.0, 1.0), "meh"),
    ];
    let table = fold(&records, &lexicon, &grid);

    assert_eq!(table.get("A1"), Some(&AggregateRow::new(1, 3)));
    assert_eq!(table.get("A2"), Some(&AggregateRow::new(1, 0)));
    assert_eq!(table.totals(), AggregateRow::new(2, 3));
}

#[test]
fn test_boundary_point_is_assigned_once() {
    let grid = GridIndex::new(vec![
        GridCell::new("A", 0.0, 1.0, 0.0, 1.0),
        GridCell::new("B", 1.0, 2.0, 0.0, 1.0),
    ])
    .unwrap();

    let on_edge = Point::new(1.0, 0.5);
    let owners: Vec<_> = grid
        .cells()
        .iter()
        .filter(|cell| cell.contains(on_edge))
        .map(|cell| cell.id.as_str())
        .collect();

    assert_eq!(owners, vec!["A"]);
}
