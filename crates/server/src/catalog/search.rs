use crate::models::category::CategoryFilter;
use crate::models::resource::Resource;

/// Category plus case-insensitive term. An empty term matches everything in the category.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    term: String,
    category: CategoryFilter,
}

impl ResourceFilter {
    pub fn new(term: &str, category: CategoryFilter) -> Self {
        Self {
            term: term.to_lowercase(),
            category,
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        self.category.matches(&resource.row.category_id) && self.matches_term(resource)
    }

    fn matches_term(&self, resource: &Resource) -> bool {
        if self.term.is_empty() {
            return true;
        }
        let contains = |text: &str| text.to_lowercase().contains(&self.term);
        contains(&resource.row.title)
            || contains(&resource.row.description)
            || resource.row.tags.iter().any(|tag| contains(tag))
    }
}

/// Filtered view over a resource list. Each call to `iter` starts a fresh scan.
#[derive(Clone, Copy, Debug)]
pub struct SearchView<'a> {
    resources: &'a [Resource],
    filter: &'a ResourceFilter,
}

impl<'a> SearchView<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Resource> + Clone + 'a {
        let filter = self.filter;
        self.resources.iter().filter(move |r| filter.matches(r))
    }

    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn to_vec(&self) -> Vec<Resource> {
        self.iter().cloned().collect()
    }
}

pub fn search<'a>(resources: &'a [Resource], filter: &'a ResourceFilter) -> SearchView<'a> {
    SearchView { resources, filter }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::category::ResourceCategory;
    use crate::models::resource::ResourceRow;

    fn category(name: &str) -> ResourceCategory {
        ResourceCategory {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
        }
    }

    fn resource(category: &ResourceCategory, title: &str, description: &str, tags: &[&str]) -> Resource {
        Resource::new(
            ResourceRow {
                id: Uuid::new_v4(),
                title: title.to_string(),
                description: description.to_string(),
                category_id: category.id,
                file_path: format!("{}/{}", category.id, title),
                file_name: format!("{title}.pdf"),
                file_size: 10,
                file_type: "application/pdf".to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                is_pack: false,
                pack_size: 1,
                created_at: Utc::now(),
            },
            category.clone(),
        )
    }

    fn fixture() -> (ResourceCategory, ResourceCategory, Vec<Resource>) {
        let quizzes = category("Quiz Packs");
        let news = category("Newsletters");
        let resources = vec![
            resource(&quizzes, "Seaside Quiz", "Twenty questions about the coast", &["summer"]),
            resource(&quizzes, "Music Round", "Name that tune", &["Sixties", "music"]),
            resource(&news, "March Newsletter", "Garden party photos", &[]),
            resource(&news, "April Newsletter", "Easter bonnets and a SEASIDE trip", &["spring"]),
        ];
        (quizzes, news, resources)
    }

    fn titles(view: SearchView<'_>) -> Vec<String> {
        view.iter().map(|r| r.row.title.clone()).collect()
    }

    #[test]
    fn empty_term_returns_whole_category() {
        let (quizzes, _, resources) = fixture();

        let all = ResourceFilter::default();
        assert_eq!(search(&resources, &all).count(), 4);

        let only_quizzes = ResourceFilter::new("", CategoryFilter::Category(quizzes.id));
        assert_eq!(
            titles(search(&resources, &only_quizzes)),
            vec!["Seaside Quiz", "Music Round"]
        );
    }

    #[test]
    fn term_matches_title_description_and_tags_case_insensitively() {
        let (_, _, resources) = fixture();

        let seaside = ResourceFilter::new("SeaSide", CategoryFilter::All);
        assert_eq!(
            titles(search(&resources, &seaside)),
            vec!["Seaside Quiz", "April Newsletter"]
        );

        let by_tag = ResourceFilter::new("sixties", CategoryFilter::All);
        assert_eq!(titles(search(&resources, &by_tag)), vec!["Music Round"]);

        let by_description = ResourceFilter::new("garden", CategoryFilter::All);
        assert_eq!(titles(search(&resources, &by_description)), vec!["March Newsletter"]);
    }

    #[test]
    fn term_and_category_must_both_match() {
        let (_, news, resources) = fixture();

        let filter = ResourceFilter::new("seaside", CategoryFilter::Category(news.id));
        assert_eq!(titles(search(&resources, &filter)), vec!["April Newsletter"]);

        let nothing = ResourceFilter::new("quiz", CategoryFilter::Category(news.id));
        assert_eq!(search(&resources, &nothing).count(), 0);
    }

    #[test]
    fn every_result_satisfies_the_filter() {
        let (quizzes, news, resources) = fixture();
        let terms = ["", "a", "news", "MUSIC", "spring", "zzz"];
        let categories = [
            CategoryFilter::All,
            CategoryFilter::Category(quizzes.id),
            CategoryFilter::Category(news.id),
        ];

        for term in terms {
            for category in categories {
                let filter = ResourceFilter::new(term, category);
                let needle = term.to_lowercase();
                let found: Vec<&Resource> = search(&resources, &filter).iter().collect();
                let expected = resources.iter().filter(|r| {
                    category.matches(&r.row.category_id)
                        && (needle.is_empty()
                            || r.row.title.to_lowercase().contains(&needle)
                            || r.row.description.to_lowercase().contains(&needle)
                            || r.row.tags.iter().any(|t| t.to_lowercase().contains(&needle)))
                });
                assert_eq!(found, expected.collect::<Vec<_>>(), "term {term:?}");
            }
        }
    }

    #[test]
    fn whitespace_term_is_matched_literally() {
        let quizzes = category("Quiz Packs");
        let resources = vec![
            resource(&quizzes, "Bingo", "Cards", &["fun"]),
            resource(&quizzes, "Sing Along", "Songbook", &[]),
        ];

        let space = ResourceFilter::new(" ", CategoryFilter::All);
        assert_eq!(space.term(), " ");
        assert_eq!(titles(search(&resources, &space)), vec!["Sing Along"]);

        let padded = ResourceFilter::new(" bingo", CategoryFilter::All);
        assert_eq!(search(&resources, &padded).count(), 0);
    }

    #[test]
    fn view_can_be_iterated_again() {
        let (_, _, resources) = fixture();
        let filter = ResourceFilter::new("newsletter", CategoryFilter::All);
        let view = search(&resources, &filter);

        let first = view.iter();
        let replay = first.clone();
        assert_eq!(first.count(), 2);
        assert_eq!(replay.count(), 2);
        assert_eq!(view.to_vec().len(), 2);
    }
}
