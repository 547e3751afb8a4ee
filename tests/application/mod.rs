mod artifact_janitor_test;
mod format_normalizer_test;
mod lazy_capability_test;
mod reply_generator_test;
