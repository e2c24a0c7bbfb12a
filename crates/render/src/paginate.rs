use crate::model::{Page, SectionBlock};

/// Greedy page filling that never splits a section.
///
/// `first_page_reserve` lines of the first page are taken by the header. A
/// section that does not fit in the remaining space starts a new page; a
/// section taller than a whole page still gets a page of its own. The result
/// always has at least one page.
pub fn paginate(
    sections: Vec<SectionBlock>,
    lines_per_page: usize,
    first_page_reserve: usize,
) -> Vec<Page> {
    let capacity = lines_per_page.max(1);
    let mut pages = Vec::new();
    let mut current: Vec<SectionBlock> = Vec::new();
    let mut used = first_page_reserve;

    for section in sections {
        let height = section.estimated_lines();
        if !current.is_empty() && used + height > capacity {
            pages.push(std::mem::take(&mut current));
            used = 0;
        }
        used += height;
        current.push(section);
    }
    pages.push(current);

    pages
        .into_iter()
        .enumerate()
        .map(|(i, sections)| Page {
            number: i + 1,
            sections,
        })
        .collect()
}
