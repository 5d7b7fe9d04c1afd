use conclave::{
    format::{format_block, format_weight, member_label, voting_power_percent},
    Member, MemberFilter, MemberStore, SortKey, ViewCache, ViewParams,
};

fn sample_store() -> MemberStore {
    MemberStore::from_members([
        Member::new(1, 850_000, 18_450_000)
            .with_delegate(true)
            .with_last_active(18_567_890),
        Member::new(2, 720_000, 18_451_200).with_last_active(18_567_234),
        Member::new(3, 650_000, 18_452_100)
            .with_delegate(true)
            .with_last_active(18_566_789),
        Member::new(4, 420_000, 18_453_000).with_last_active(18_567_123),
        Member::new(5, 380_000, 18_454_500).with_last_active(18_566_543),
        Member::new(6, 290_000, 18_455_200)
            .with_delegate(true)
            .with_last_active(18_567_001),
        Member::new(7, 180_000, 18_456_800).with_last_active(18_566_890),
        Member::new(8, 95_000, 18_457_900).with_last_active(18_567_456),
        Member::new(9, 75_000, 18_458_600).with_last_active(18_567_321),
        Member::new(10, 45_000, 18_459_200).with_last_active(18_567_789),
    ])
    .expect("sample indices are unique")
}

fn main() {
    env_logger::init();

    let filter_by = match std::env::var("FILTER").as_deref() {
        Ok("delegates") => MemberFilter::DelegatesOnly,
        Ok("members") => MemberFilter::MembersOnly,
        _ => MemberFilter::All,
    };
    let sort_by = match std::env::var("SORT").as_deref() {
        Ok("recent") => SortKey::ByRecency,
        Ok("index") => SortKey::ByIndex,
        _ => SortKey::ByWeight,
    };
    let params = ViewParams::new(
        std::env::var("SEARCH").unwrap_or_default(),
        filter_by,
        sort_by,
    );

    let store = sample_store();
    let mut cache = ViewCache::new();
    let view = cache.project(&store, &params);
    let stats = view.stats();

    println!(
        "{} shown, {} delegates, total {}, average {}",
        stats.shown_count,
        stats.delegate_count,
        stats.formatted_total(),
        stats.formatted_average()
    );

    if view.is_empty() {
        println!("No members found matching your criteria");
        return;
    }

    for member in view.members() {
        println!(
            "{}{:>10} {:>5.1}%  {}",
            member_label(member.index()),
            format_weight(member.governance_weight().into()),
            voting_power_percent(member.governance_weight()),
            member
                .last_active_block()
                .map(format_block)
                .unwrap_or_default(),
        );
    }
}
