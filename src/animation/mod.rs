pub(crate) mod bezier;
