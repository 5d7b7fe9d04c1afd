use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::{
    format::{format_millions, format_thousands},
    member::Member,
    store::MemberStore,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberFilter {
    #[default]
    All,
    DelegatesOnly,
    MembersOnly,
}

impl MemberFilter {
    fn matches(&self, member: &Member) -> bool {
        match self {
            MemberFilter::All => true,
            MemberFilter::DelegatesOnly => member.is_delegate(),
            MemberFilter::MembersOnly => !member.is_delegate(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    ByWeight,
    ByRecency,
    ByIndex,
}

impl SortKey {
    /// Stable sort, ties keep their original relative order.
    fn sort(&self, members: &mut [Member]) {
        match self {
            SortKey::ByWeight => members.sort_by_key(|m| Reverse(m.governance_weight())),
            SortKey::ByRecency => members.sort_by_key(|m| Reverse(m.recency())),
            SortKey::ByIndex => members.sort_by_key(Member::index),
        }
    }
}

/// Parameters driving a registry projection.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewParams {
    pub search_term: String,
    pub filter_by: MemberFilter,
    pub sort_by: SortKey,
}

impl ViewParams {
    pub fn new(search_term: impl Into<String>, filter_by: MemberFilter, sort_by: SortKey) -> Self {
        Self {
            search_term: search_term.into(),
            filter_by,
            sort_by,
        }
    }

    /// Drop search term and filter, keep the sort key.
    pub fn cleared(self) -> Self {
        Self {
            sort_by: self.sort_by,
            ..Default::default()
        }
    }

    pub fn matches(&self, member: &Member) -> bool {
        self.filter_by.matches(member)
            && (self.search_term.is_empty()
                || member.index().to_string().contains(&self.search_term))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub shown_count: usize,
    pub delegate_count: usize,
    pub total_weight: u128,
    pub average_weight: f64,
}

impl RegistryStats {
    fn collect<'a>(members: impl IntoIterator<Item = &'a Member>) -> Self {
        let mut stats = Self::default();
        for member in members {
            stats.shown_count += 1;
            stats.total_weight += member.governance_weight() as u128;
            if member.is_delegate() {
                stats.delegate_count += 1;
            }
        }

        if stats.shown_count > 0 {
            stats.average_weight = stats.total_weight as f64 / stats.shown_count as f64;
        }

        stats
    }

    pub fn formatted_total(&self) -> String {
        format_millions(self.total_weight)
    }

    pub fn formatted_average(&self) -> String {
        format_thousands(self.average_weight)
    }
}

/// Filtered, sorted and aggregated projection of a member snapshot.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryView {
    members: Vec<Member>,
    stats: RegistryStats,
}

impl RegistryView {
    pub fn project(members: &[Member], params: &ViewParams) -> Self {
        let mut shown: Vec<Member> = members
            .iter()
            .filter(|m| params.matches(m))
            .cloned()
            .collect();

        let stats = RegistryStats::collect(&shown);
        params.sort_by.sort(&mut shown);

        log::debug!(
            target: "registry",
            "projected {}/{} members ({params:?})",
            stats.shown_count,
            members.len()
        );

        Self {
            members: shown,
            stats,
        }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn stats(&self) -> &RegistryStats {
        &self.stats
    }

    /// Nothing matched, the caller should offer to clear the filters.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Memoizes the last projection on the store version and view parameters.
#[derive(Debug, Default)]
pub struct ViewCache {
    key: Option<(u64, ViewParams)>,
    view: RegistryView,
    #[cfg(test)]
    recomputes: usize,
}

impl ViewCache {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn project(&mut self, store: &MemberStore, params: &ViewParams) -> &RegistryView {
        let fresh = matches!(
            &self.key,
            Some((version, cached)) if *version == store.version() && cached == params
        );

        if !fresh {
            self.view = RegistryView::project(store.all(), params);
            self.key = Some((store.version(), params.clone()));
            #[cfg(test)]
            {
                self.recomputes += 1;
            }
        }

        &self.view
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    fn indices(view: &RegistryView) -> Vec<u32> {
        view.members().iter().map(Member::index).collect()
    }

    fn sample() -> Vec<Member> {
        vec![
            Member::new(1, 850_000, 18_450_000)
                .with_delegate(true)
                .with_last_active(18_567_890),
            Member::new(2, 720_000, 18_451_200).with_last_active(18_567_234),
            Member::new(3, 650_000, 18_452_100)
                .with_delegate(true)
                .with_last_active(18_566_789),
            Member::new(12, 720_000, 18_453_000),
            Member::new(21, 45_000, 18_454_500).with_last_active(18_567_789),
        ]
    }

    fn random_members(rng: &mut impl Rng) -> Vec<Member> {
        let count = rng.gen_range(0..40);
        let mut seen = HashSet::new();

        (0..count)
            .filter_map(|n| {
                let index = rng.gen_range(1..200);
                if !seen.insert(index) {
                    return None;
                }

                let mut member = Member::new(index, rng.gen_range(0..2_000_000), n)
                    .with_delegate(rng.gen_bool(0.3));
                if rng.gen_bool(0.8) {
                    member = member.with_last_active(rng.gen_range(0..1_000));
                }

                Some(member)
            })
            .collect()
    }

    fn random_params(rng: &mut impl Rng) -> ViewParams {
        let filter_by = match rng.gen_range(0..3) {
            0 => MemberFilter::All,
            1 => MemberFilter::DelegatesOnly,
            _ => MemberFilter::MembersOnly,
        };
        let sort_by = match rng.gen_range(0..3) {
            0 => SortKey::ByWeight,
            1 => SortKey::ByRecency,
            _ => SortKey::ByIndex,
        };
        let search_term = if rng.gen_bool(0.5) {
            String::new()
        } else {
            rng.gen_range(0..10).to_string()
        };

        ViewParams::new(search_term, filter_by, sort_by)
    }

    #[test]
    fn test_delegates_by_weight() {
        let members = vec![
            Member::new(1, 850_000, 1).with_delegate(true),
            Member::new(2, 720_000, 2),
        ];
        let params = ViewParams::new("", MemberFilter::DelegatesOnly, SortKey::ByWeight);

        let view = RegistryView::project(&members, &params);

        assert_eq!(indices(&view), vec![1]);
        assert_eq!(view.stats().shown_count, 1);
        assert_eq!(view.stats().delegate_count, 1);
        assert_eq!(view.stats().total_weight, 850_000);
        assert_eq!(view.stats().average_weight, 850_000.0);
        assert_eq!(view.stats().formatted_total(), "0.9M");
    }

    #[test]
    fn test_search_is_substring_match() {
        let members: Vec<_> = [1, 2, 3, 12, 21]
            .into_iter()
            .map(|i| Member::new(i, 1, i as u64))
            .collect();
        let params = ViewParams::new("2", MemberFilter::All, SortKey::ByIndex);

        assert_eq!(
            indices(&RegistryView::project(&members, &params)),
            vec![2, 12, 21]
        );
    }

    #[test]
    fn test_members_only() {
        let params = ViewParams::new("", MemberFilter::MembersOnly, SortKey::ByIndex);
        let view = RegistryView::project(&sample(), &params);

        assert_eq!(indices(&view), vec![2, 12, 21]);
        assert_eq!(view.stats().delegate_count, 0);
    }

    #[test]
    fn test_weight_ties_keep_insertion_order() {
        let view = RegistryView::project(&sample(), &ViewParams::default());

        assert_eq!(indices(&view), vec![1, 2, 12, 3, 21]);
    }

    #[test]
    fn test_recency_treats_missing_as_zero() {
        let params = ViewParams::new("", MemberFilter::All, SortKey::ByRecency);
        let view = RegistryView::project(&sample(), &params);

        assert_eq!(indices(&view), vec![1, 21, 2, 3, 12]);
    }

    #[test]
    fn test_empty_store() {
        let view = RegistryView::project(&[], &ViewParams::default());

        assert!(view.is_empty());
        assert_eq!(view.stats(), &RegistryStats::default());
        assert_eq!(view.stats().average_weight, 0.0);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let params = ViewParams::new("999", MemberFilter::DelegatesOnly, SortKey::ByWeight);
        let view = RegistryView::project(&sample(), &params);

        assert!(view.is_empty());
        assert_eq!(view.stats().shown_count, 0);
        assert_eq!(view.stats().average_weight, 0.0);
    }

    #[test]
    fn test_cleared_keeps_sort() {
        let params = ViewParams::new("12", MemberFilter::DelegatesOnly, SortKey::ByRecency);

        assert_eq!(
            params.cleared(),
            ViewParams::new("", MemberFilter::All, SortKey::ByRecency)
        );
    }

    #[test]
    fn test_properties_hold_for_random_stores() {
        let mut rng = StdRng::seed_from_u64(0x5161_1e11);

        for _ in 0..200 {
            let members = random_members(&mut rng);
            let params = random_params(&mut rng);
            let view = RegistryView::project(&members, &params);
            let stats = view.stats();

            let sum: u128 = view
                .members()
                .iter()
                .map(|m| m.governance_weight() as u128)
                .sum();
            assert_eq!(sum, stats.total_weight);
            assert_eq!(stats.shown_count, view.members().len());

            if stats.shown_count == 0 {
                assert_eq!(stats.average_weight, 0.0);
            }

            match params.sort_by {
                SortKey::ByWeight => assert!(view
                    .members()
                    .windows(2)
                    .all(|w| w[0].governance_weight() >= w[1].governance_weight())),
                SortKey::ByRecency => assert!(view
                    .members()
                    .windows(2)
                    .all(|w| w[0].recency() >= w[1].recency())),
                SortKey::ByIndex => assert!(view
                    .members()
                    .windows(2)
                    .all(|w| w[0].index() < w[1].index())),
            }

            // filtering twice changes nothing
            let again = RegistryView::project(view.members(), &params);
            assert_eq!(again.members(), view.members());
        }
    }

    #[test]
    fn test_unfiltered_view_is_whole_store() {
        let mut rng = StdRng::seed_from_u64(0x5161_1e11);

        for _ in 0..50 {
            let members = random_members(&mut rng);
            let mut params = random_params(&mut rng);
            params = params.cleared();

            let view = RegistryView::project(&members, &params);
            let shown: HashSet<_> = view.members().iter().map(Member::index).collect();
            let all: HashSet<_> = members.iter().map(Member::index).collect();

            assert_eq!(shown, all);
        }
    }

    #[test]
    fn test_cache_recomputes_on_change() {
        let mut store = MemberStore::from_members(sample()).unwrap();
        let mut cache = ViewCache::new();
        let params = ViewParams::default();

        assert_eq!(cache.project(&store, &params).stats().shown_count, 5);
        assert_eq!(cache.project(&store, &params).stats().shown_count, 5);
        assert_eq!(cache.recomputes, 1);

        store.insert(Member::new(30, 1, 18_460_000)).unwrap();
        assert_eq!(cache.project(&store, &params).stats().shown_count, 6);
        assert_eq!(cache.recomputes, 2);

        let delegates = ViewParams::new("", MemberFilter::DelegatesOnly, SortKey::ByWeight);
        assert_eq!(cache.project(&store, &delegates).stats().shown_count, 2);
        assert_eq!(cache.project(&store, &delegates).stats().shown_count, 2);
        assert_eq!(cache.recomputes, 3);
        assert_eq!(cache.key, Some((store.version(), delegates)));
    }
}
