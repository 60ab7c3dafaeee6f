/// A single page of an ordered result set.
///
/// Pages are 1-indexed. Requesting a page past the end is not an error;
/// the page is simply empty.
#[derive(Debug)]
pub struct Pagination<T> {
	pub items: Vec<T>,
	pub page: u32,
	pub per_page: u32,
	pub total: i64,
}

/// Translates a page number into a `LIMIT`/`OFFSET` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginate {
	pub page: u32,
	pub size: u32,
}

impl Paginate {
	/// Page `0` is treated as the first page.
	pub fn new(page: u32, size: u32) -> Self {
		Self {
			page: page.max(1),
			size,
		}
	}

	pub fn offset(&self) -> i64 {
		i64::from(self.page - 1) * i64::from(self.size)
	}

	pub fn limit(&self) -> i64 {
		i64::from(self.size)
	}
}

impl<T> Pagination<T> {
	/// Total number of pages, at least 1.
	pub fn pages(&self) -> u32 {
		let per_page = i64::from(self.per_page.max(1));
		let pages = (self.total + per_page - 1) / per_page;

		u32::try_from(pages).unwrap_or(u32::MAX).max(1)
	}

	pub fn has_prev(&self) -> bool {
		self.page > 1
	}

	pub fn has_next(&self) -> bool {
		self.page < self.pages()
	}

	pub fn prev_num(&self) -> Option<u32> {
		self.has_prev().then(|| self.page - 1)
	}

	pub fn next_num(&self) -> Option<u32> {
		self.has_next().then(|| self.page + 1)
	}

	/// Page numbers to show in the pagination controls.
	///
	/// Always includes the two first and last pages, two pages before the
	/// current one and four after it. `None` marks a gap.
	pub fn iter_pages(&self) -> Vec<Option<u32>> {
		const LEFT_EDGE: u32 = 2;
		const LEFT_CURRENT: u32 = 2;
		const RIGHT_CURRENT: u32 = 5;
		const RIGHT_EDGE: u32 = 2;

		let pages = self.pages();
		let mut numbers = Vec::new();
		let mut last = 0;

		for num in 1..=pages {
			let visible = num <= LEFT_EDGE
				|| (num + LEFT_CURRENT + 1 > self.page && num < self.page + RIGHT_CURRENT)
				|| num + RIGHT_EDGE > pages;

			if visible {
				if last + 1 != num {
					numbers.push(None);
				}

				numbers.push(Some(num));
				last = num;
			}
		}

		numbers
	}
}
