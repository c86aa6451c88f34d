mod word_list_loader;

pub use word_list_loader::{WordListError, load_candidate_labels, load_stopwords};
