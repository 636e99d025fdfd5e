use crate::types::{PageGroup, PageRecord, Section};

/// グループ順に並べ替えたページとセクション表
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedPages<'a> {
    pub pages: Vec<&'a PageRecord>,
    pub sections: [Section; 3],
}

impl Default for OrderedPages<'_> {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            sections: Section::default_table(),
        }
    }
}

/// Start → Normal → Big の順に並べる。各グループ内の順序は入力順のまま
pub fn order_pages(pages: &[PageRecord]) -> OrderedPages<'_> {
    let mut ordered = Vec::with_capacity(pages.len());
    let mut sections = Section::default_table();

    for (section, group) in sections.iter_mut().zip(PageGroup::ALL) {
        section.start_index = ordered.len();
        ordered.extend(pages.iter().filter(|p| p.group == group));
    }

    OrderedPages { pages: ordered, sections }
}
