pub(crate) mod select_reviewers;
