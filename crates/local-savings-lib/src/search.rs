use crate::listings::{Listing, ListingKind};

/// Case-insensitive substring match against a listing's name or card text.
/// An empty term matches everything.
pub fn matches(listing: &Listing, term: &str) -> bool {
    let term = term.to_lowercase();
    listing.name().to_lowercase().contains(&term) || listing.text().to_lowercase().contains(&term)
}

/// Listings of `kind` that match `term`, in their original order.
pub fn filter<'a>(listings: &'a [Listing], kind: Option<ListingKind>, term: &str) -> Vec<&'a Listing> {
    listings
        .iter()
        .filter(|listing| kind.map(|k| listing.kind() == k).unwrap_or(true))
        .filter(|listing| matches(listing, term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::default_listings;

    #[test]
    fn test_empty_term_shows_everything() {
        let listings = default_listings();
        assert_eq!(filter(&listings, None, "").len(), listings.len());
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let listings = default_listings();
        let found = filter(&listings, None, "FOOD lion");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), "food-lion");
    }

    #[test]
    fn test_match_on_card_text() {
        let listings = default_listings();
        let found = filter(&listings, Some(ListingKind::Grocery), "fuel points");
        assert_eq!(found.iter().map(|l| l.id()).collect::<Vec<_>>(), vec!["ingles"]);
    }

    #[test]
    fn test_kind_filter() {
        let listings = default_listings();
        let businesses = filter(&listings, Some(ListingKind::Business), "");
        assert!(businesses.iter().all(|l| l.kind() == ListingKind::Business));
        assert_eq!(businesses.len(), 2);
    }

    #[test]
    fn test_no_match() {
        let listings = default_listings();
        assert!(filter(&listings, None, "sushi").is_empty());
    }
}
