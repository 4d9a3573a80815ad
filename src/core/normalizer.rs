//! Curriculum normalization
//!
//! Turns the per-year course lists of a [`Curriculum`] into a flat list of
//! uniquely identified [`Course`]s plus [`Year`] header nodes, merging in the
//! student's completed-set.

use crate::core::models::{Course, Curriculum, Position, RawCourse, Term, Year};
use crate::core::store::CompletedSet;
use crate::debug;

/// Horizontal distance between year bands
const YEAR_WIDTH: i32 = 600;
/// Horizontal distance between the two half-year columns of a year
const TERM_WIDTH: i32 = 250;
/// Vertical distance between rows
const ROW_HEIGHT: i32 = 100;
/// Vertical offset of the first course row (year headers sit at 0)
const FIRST_ROW: i32 = 100;
/// Horizontal offset of year headers within their band
const YEAR_HEADER_OFFSET: i32 = 150;

/// Output of [`normalize`]
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Courses in year order, term-sorted within each year
    pub courses: Vec<Course>,
    /// Year nodes in plan order (years without courses are omitted)
    pub years: Vec<Year>,
}

/// Normalize a curriculum
///
/// Years are numbered from 1 in plan order. Within a year, courses are
/// stably sorted by term and numbered from 1, so `y2-m3` is the third course
/// of the second year. A year without courses still consumes its number but
/// produces no year node and no courses.
///
/// A course is `done` when its id appears in `completed` under the
/// curriculum's name.
#[must_use]
pub fn normalize(curriculum: &Curriculum, completed: &CompletedSet) -> Normalized {
    let mut normalized = Normalized::default();

    for (year_offset, (year_label, raw_courses)) in curriculum.plan.iter().enumerate() {
        if raw_courses.is_empty() {
            debug!("Skipping year '{year_label}' of '{}': no courses", curriculum.name);
            continue;
        }

        let year_index = year_offset + 1;
        let mut sorted: Vec<&RawCourse> = raw_courses.iter().collect();
        sorted.sort_by_key(|course| course.term);

        let positions = layout_year(year_offset, &sorted);
        let mut year = Year::new(
            year_label,
            year_index,
            Position {
                x: band_x(year_offset) + YEAR_HEADER_OFFSET,
                y: 0,
            },
        );

        for (position_index, (raw, position)) in sorted.iter().zip(positions).enumerate() {
            let id = format!("y{year_index}-m{}", position_index + 1);
            let mut course = Course::from_raw(raw, id, year_label, position);
            course.done = completed.contains(&curriculum.name, &course.id);
            year.course_ids.push(course.id.clone());
            normalized.courses.push(course);
        }

        normalized.years.push(year);
    }

    debug!(
        "Normalized '{}': {} courses in {} years",
        curriculum.name,
        normalized.courses.len(),
        normalized.years.len()
    );

    normalized
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn band_x(year_offset: usize) -> i32 {
    YEAR_WIDTH * year_offset as i32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn row_y(row: usize) -> i32 {
    FIRST_ROW + ROW_HEIGHT * row as i32
}

/// Display positions for the term-sorted courses of one year
///
/// Half-year courses fill two columns, each compacted to start at the top
/// row. Full-year courses follow underneath the taller column, one per row,
/// centred between the two columns.
fn layout_year(year_offset: usize, sorted: &[&RawCourse]) -> Vec<Position> {
    let count_in = |term: Term| sorted.iter().filter(|c| c.term == term).count();
    let first_half = count_in(Term::FirstHalf);
    let second_half = count_in(Term::SecondHalf);
    let x = band_x(year_offset);

    sorted
        .iter()
        .enumerate()
        .map(|(index, course)| match course.term.column() {
            Some(column) => {
                let preceding = if course.term == Term::SecondHalf {
                    first_half
                } else {
                    0
                };
                Position {
                    x: x + TERM_WIDTH * column,
                    y: row_y(index - preceding),
                }
            }
            None => Position {
                x: x + TERM_WIDTH / 2,
                y: row_y(first_half.max(second_half) + index - first_half - second_half),
            },
        })
        .collect()
}
