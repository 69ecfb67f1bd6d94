//! # Table Pagination
//!
//! Splits a list of fixed-height table rows into one chunk per page, given
//! the page's body height and *estimated* heights for the fixed content
//! around the table. Rows are never measured: every row of a table has the
//! same height, so capacity is a division.
//!
//! Two passes:
//!
//! 1. **Row-count partition.** The first page loses `first_page_overhead`
//!    (header and metadata blocks) before the table starts; continuation
//!    pages only repeat the table header row. Fill page one, then fill
//!    continuation pages until the rows run out.
//! 2. **Trailing-content check.** Totals, notes, and signature blocks must
//!    follow the *last* chunk on the same page. If they don't fit after the
//!    last chunk, append one empty chunk: a page holding only the trailing
//!    block. Trailing content taller than a whole page is not handled.
//!
//! Pagination never fails. An empty row list still produces one (empty)
//! chunk, so every document has at least one page.

/// Page geometry and overhead estimates driving the split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pagination {
    /// Height of every data row.
    pub row_height: f64,
    /// Height of the table header row repeated on each page (0 without one).
    pub header_row_height: f64,
    /// Space taken by content that only appears on page one.
    pub first_page_overhead: f64,
    /// Space taken by a running header on continuation pages.
    pub continuation_overhead: f64,
    /// Usable body height of every page.
    pub body_height: f64,
    /// Height of the content that must follow the last row.
    pub trailing_height: f64,
}

/// A chunk of rows together with its position in the page sequence.
#[derive(Debug)]
pub struct ChunkPage<'a, T> {
    pub index: usize,
    pub rows: &'a [T],
    pub is_first: bool,
    pub is_last: bool,
}

impl Pagination {
    /// Rows that fit on page one under the header and metadata blocks.
    pub fn max_rows_first(&self) -> usize {
        row_capacity(
            self.body_height - self.first_page_overhead - self.header_row_height,
            self.row_height,
        )
    }

    /// Rows that fit on a continuation page.
    pub fn max_rows_continuation(&self) -> usize {
        row_capacity(self.body_height - self.header_row_height, self.row_height)
    }

    /// Split `records` into per-page chunks, repairing the trailing block fit.
    pub fn split<'a, T>(&self, records: &'a [T]) -> Vec<&'a [T]> {
        let first = self.max_rows_first();
        let continuation = self.max_rows_continuation();

        let (head, rest) = records.split_at(first.min(records.len()));
        let mut chunks = vec![head];
        chunks.extend(rest.chunks(continuation));

        let last_index = chunks.len() - 1;
        let overhead = if last_index == 0 {
            self.first_page_overhead
        } else {
            self.continuation_overhead
        };
        let used = overhead
            + self.header_row_height
            + chunks[last_index].len() as f64 * self.row_height;

        if used + self.trailing_height > self.body_height {
            log::debug!(
                "trailing block ({:.1}pt) does not fit after {:.1}pt on page {}, adding a page",
                self.trailing_height,
                used,
                last_index + 1
            );
            chunks.push(&records[records.len()..]);
        }

        log::debug!(
            "paginated {} rows into {} pages ({} first, {} per continuation page)",
            records.len(),
            chunks.len(),
            first,
            continuation
        );
        chunks
    }

    /// Summary-first arrangement: page one carries only the summary and the
    /// trailing block, every row goes to continuation pages.
    pub fn split_summary_first<'a, T>(&self, records: &'a [T]) -> Vec<&'a [T]> {
        let mut chunks = vec![&records[..0]];
        chunks.extend(records.chunks(self.max_rows_continuation()));
        chunks
    }
}

/// Attach page positions to a chunk list.
pub fn chunk_pages<'a, T>(chunks: &[&'a [T]]) -> Vec<ChunkPage<'a, T>> {
    let last = chunks.len().saturating_sub(1);
    chunks
        .iter()
        .enumerate()
        .map(|(index, rows)| ChunkPage {
            index,
            rows,
            is_first: index == 0,
            is_last: index == last,
        })
        .collect()
}

/// `max(1, floor(available / row_height))`; a non-positive row height means
/// rows take no space and everything fits.
fn row_capacity(available: f64, row_height: f64) -> usize {
    if row_height <= 0.0 {
        return usize::MAX;
    }
    let rows = (available / row_height).floor();
    if rows.is_nan() || rows < 1.0 {
        1
    } else {
        rows as usize
    }
}
