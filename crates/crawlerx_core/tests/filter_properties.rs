use crawlerx_core::{classify_link, Job, JobFilter, JobStatus, LinkKind, StatusFilter};
use proptest::prelude::*;

fn status_strategy() -> impl Strategy<Value = JobStatus> {
    prop_oneof![
        Just(JobStatus::Pending),
        Just(JobStatus::Done),
        Just(JobStatus::Failed),
        "[a-z]{1,6}".prop_map(|s: String| JobStatus::parse(&s)),
    ]
}

fn job_strategy() -> impl Strategy<Value = Job> {
    ("[a-zA-Z0-9-]{1,12}", "https?://[a-zA-Z.]{1,16}/[a-zA-Z]{0,6}", status_strategy()).prop_map(
        |(id, url, status)| Job {
            id,
            url,
            status,
            ..Job::default()
        },
    )
}

fn status_filter_strategy() -> impl Strategy<Value = StatusFilter> {
    prop_oneof![
        Just(StatusFilter::All),
        status_strategy().prop_map(StatusFilter::Only),
    ]
}

proptest! {
    #[test]
    fn query_results_are_a_matching_subset(
        jobs in prop::collection::vec(job_strategy(), 0..20),
        query in "[a-zA-Z.]{1,4}",
    ) {
        let filter = JobFilter { query: query.clone(), status: StatusFilter::All };
        let shown = filter.apply(&jobs);
        prop_assert!(shown.len() <= jobs.len());
        let needle = query.to_lowercase();
        for job in shown {
            prop_assert!(jobs.contains(job));
            prop_assert!(
                job.url.to_lowercase().contains(&needle) || job.id.to_lowercase().contains(&needle)
            );
        }
    }

    #[test]
    fn status_filter_keeps_only_that_status(
        jobs in prop::collection::vec(job_strategy(), 0..20),
        status in status_strategy(),
    ) {
        let filter = JobFilter { query: String::new(), status: StatusFilter::Only(status.clone()) };
        for job in filter.apply(&jobs) {
            prop_assert_eq!(&job.status, &status);
        }
    }

    #[test]
    fn all_statuses_is_identity(jobs in prop::collection::vec(job_strategy(), 0..20)) {
        let shown = JobFilter::default().apply(&jobs);
        prop_assert_eq!(shown, jobs.iter().collect::<Vec<_>>());
    }

    #[test]
    fn combined_filter_is_the_intersection(
        jobs in prop::collection::vec(job_strategy(), 0..20),
        query in "[a-zA-Z]{0,3}",
        status in status_filter_strategy(),
    ) {
        let both = JobFilter { query: query.clone(), status: status.clone() };
        let by_query = JobFilter { query, status: StatusFilter::All };
        let by_status = JobFilter { query: String::new(), status };

        let expected: Vec<&Job> = jobs
            .iter()
            .filter(|job| by_query.matches(job) && by_status.matches(job))
            .collect();
        prop_assert_eq!(both.apply(&jobs), expected);
    }

    #[test]
    fn scheme_prefixed_links_are_external(
        scheme in "[a-zA-Z][a-zA-Z0-9+.-]{0,8}",
        rest in "[^ ]{0,20}",
    ) {
        let link = format!("{scheme}:{rest}");
        prop_assert_eq!(classify_link(&link), LinkKind::External);
    }

    #[test]
    fn links_without_scheme_are_internal(path in "/[a-zA-Z0-9/._-]{0,20}") {
        prop_assert_eq!(classify_link(&path), LinkKind::Internal);
    }
}
