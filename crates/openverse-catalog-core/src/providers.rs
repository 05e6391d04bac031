//! Provider identity tables
//!
//! Default provider names for each provider API, the sub-provider tables used
//! to reclassify records by the institution that supplied them, and the
//! default image category per source.
//!
//! Sub-provider tables map a sub-provider name to the value (or values) from
//! the API response that identify it.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const FLICKR_DEFAULT_PROVIDER: &str = "flickr";
pub const EUROPEANA_DEFAULT_PROVIDER: &str = "europeana";
pub const WIKIMEDIA_AUDIO_PROVIDER: &str = "wikimedia_audio";
pub const WIKIMEDIA_DEFAULT_PROVIDER: &str = "wikimedia";
pub const SMITHSONIAN_DEFAULT_PROVIDER: &str = "smithsonian";
pub const BROOKLYN_DEFAULT_PROVIDER: &str = "brooklynmuseum";
pub const CLEVELAND_DEFAULT_PROVIDER: &str = "clevelandmuseum";
pub const METROPOLITAN_MUSEUM_DEFAULT_PROVIDER: &str = "met";
pub const VICTORIA_DEFAULT_PROVIDER: &str = "museumsvictoria";
pub const NYPL_DEFAULT_PROVIDER: &str = "nypl";
pub const RAWPIXEL_DEFAULT_PROVIDER: &str = "rawpixel";
pub const SCIENCE_DEFAULT_PROVIDER: &str = "sciencemuseum";
pub const SMK_DEFAULT_PROVIDER: &str = "smk";
pub const WALTERS_DEFAULT_PROVIDER: &str = "waltersartmuseum";
pub const FINNISH_DEFAULT_PROVIDER: &str = "finnishmuseums";
pub const JAMENDO_DEFAULT_PROVIDER: &str = "jamendo";
pub const STOCKSNAP_DEFAULT_PROVIDER: &str = "stocksnap";
pub const WORDPRESS_DEFAULT_PROVIDER: &str = "wordpress";
pub const FREESOUND_DEFAULT_PROVIDER: &str = "freesound";
pub const INATURALIST_DEFAULT_PROVIDER: &str = "inaturalist";
pub const PHYLOPIC_DEFAULT_PROVIDER: &str = "phylopic";

/// Every default provider name, in declaration order
pub const DEFAULT_PROVIDERS: &[&str] = &[
    FLICKR_DEFAULT_PROVIDER,
    EUROPEANA_DEFAULT_PROVIDER,
    WIKIMEDIA_AUDIO_PROVIDER,
    WIKIMEDIA_DEFAULT_PROVIDER,
    SMITHSONIAN_DEFAULT_PROVIDER,
    BROOKLYN_DEFAULT_PROVIDER,
    CLEVELAND_DEFAULT_PROVIDER,
    METROPOLITAN_MUSEUM_DEFAULT_PROVIDER,
    VICTORIA_DEFAULT_PROVIDER,
    NYPL_DEFAULT_PROVIDER,
    RAWPIXEL_DEFAULT_PROVIDER,
    SCIENCE_DEFAULT_PROVIDER,
    SMK_DEFAULT_PROVIDER,
    WALTERS_DEFAULT_PROVIDER,
    FINNISH_DEFAULT_PROVIDER,
    JAMENDO_DEFAULT_PROVIDER,
    STOCKSNAP_DEFAULT_PROVIDER,
    WORDPRESS_DEFAULT_PROVIDER,
    FREESOUND_DEFAULT_PROVIDER,
    INATURALIST_DEFAULT_PROVIDER,
    PHYLOPIC_DEFAULT_PROVIDER,
];

/// Finnish museums: sub-provider -> building prefix
pub const FINNISH_SUB_PROVIDERS: &[(&str, &str)] = &[
    ("national_museum_of_finland", "0/Suomen kansallismuseo/"),
    ("finnish_heritage_agency", "0/Museovirasto/"),
    ("finnish_satakunnan_museum", "0/SATMUSEO/"),
    ("finnish_military_museum", "0/SA-kuva/"),
];

/// Flickr: sub-provider -> owner ids
pub const FLICKR_SUB_PROVIDERS: &[(&str, &[&str])] = &[
    (
        "nasa",
        &[
            "24662369@N07",  // NASA Goddard Photo and Video
            "35067687@N04",  // NASA HQ PHOTO
            "29988733@N04",  // NASA Johnson
            "28634332@N05",  // NASA's Marshall Space Flight Center
            "108488366@N07", // NASAKennedy
            "136485307@N06", // Apollo Image Gallery
        ],
    ),
    ("bio_diversity", &["61021753@N02"]), // BioDivLibrary
    ("spacex", &["130608600@N05"]),       // Official SpaceX Photos
    ("woc_tech", &["136629440@N06"]),     // WOCinTech Chat
];

pub const FLICKR_PHOTO_URL_BASE: &str = "https://www.flickr.com/photos/";

/// Europeana: sub-provider -> data provider name
pub const EUROPEANA_SUB_PROVIDERS: &[(&str, &str)] =
    &[("wellcome_collection", "Wellcome Collection")];

/// Smithsonian: sub-provider -> unit codes
pub const SMITHSONIAN_SUB_PROVIDERS: &[(&str, &[&str])] = &[
    (
        "smithsonian_national_museum_of_natural_history",
        &[
            "NMNHANTHRO",    // NMNH - Anthropology Dept.
            "NMNHBIRDS",     // NMNH - Vertebrate Zoology - Birds Division
            "NMNHBOTANY",    // NMNH - Botany Dept.
            "NMNHEDUCATION", // NMNH - Education & Outreach
            "NMNHENTO",      // NMNH - Entomology Dept.
            "NMNHFISHES",    // NMNH - Vertebrate Zoology - Fishes Division
            "NMNHHERPS",     // NMNH - Vertebrate Zoology - Herpetology Division
            "NMNHINV",       // NMNH - Invertebrate Zoology Dept.
            "NMNHMAMMALS",   // NMNH - Vertebrate Zoology - Mammals Division
            "NMNHMINSCI",    // NMNH - Mineral Sciences Dept.
            "NMNHPALEO",     // NMNH - Paleobiology Dept.
        ],
    ),
    ("smithsonian_anacostia_museum", &["ACM"]),
    ("smithsonian_cooper_hewitt_museum", &["CHNDM"]),
    ("smithsonian_field_book_project", &["FBR"]),
    ("smithsonian_freer_gallery_of_art", &["FSG"]),
    (
        "smithsonian_gardens",
        &[
            "HAC",     // Smithsonian Gardens
            "OFEO-SG", // Office of Facilities Engineering and Operations
        ],
    ),
    ("smithsonian_hirshhorn_museum", &["HMSG"]),
    ("smithsonian_air_and_space_museum", &["NASM"]),
    ("smithsonian_african_american_history_museum", &["NMAAHC"]),
    ("smithsonian_american_history_museum", &["NMAH"]),
    ("smithsonian_american_indian_museum", &["NMAI"]),
    ("smithsonian_african_art_museum", &["NMAfA"]),
    ("smithsonian_portrait_gallery", &["NPG"]),
    ("smithsonian_postal_museum", &["NPM"]),
    ("smithsonian_zoo_and_conservation", &["NZP"]),
    ("smithsonian_american_art_museum", &["SAAM"]),
    ("smithsonian_institution_archives", &["SIA"]),
    ("smithsonian_libraries", &["SIL"]),
];

static FLICKR_OWNER_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| invert(FLICKR_SUB_PROVIDERS));

static SMITHSONIAN_UNIT_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| invert(SMITHSONIAN_SUB_PROVIDERS));

fn invert(
    table: &'static [(&'static str, &'static [&'static str])],
) -> HashMap<&'static str, &'static str> {
    table
        .iter()
        .flat_map(|(sub_provider, ids)| ids.iter().map(move |id| (*id, *sub_provider)))
        .collect()
}

/// Sub-provider for a Flickr owner id
pub fn flickr_sub_provider(owner_id: &str) -> Option<&'static str> {
    FLICKR_OWNER_INDEX.get(owner_id).copied()
}

/// Sub-provider for a Smithsonian unit code
pub fn smithsonian_sub_provider(unit_code: &str) -> Option<&'static str> {
    SMITHSONIAN_UNIT_INDEX.get(unit_code).copied()
}

/// Sub-provider for a Europeana data provider name
pub fn europeana_sub_provider(data_provider: &str) -> Option<&'static str> {
    EUROPEANA_SUB_PROVIDERS
        .iter()
        .find(|(_, name)| *name == data_provider)
        .map(|(sub_provider, _)| *sub_provider)
}

/// Sub-provider for a Finnish museums building path
///
/// Buildings are reported as hierarchical paths; a building belongs to a
/// sub-provider when it starts with the sub-provider's prefix.
pub fn finnish_sub_provider(building: &str) -> Option<&'static str> {
    FINNISH_SUB_PROVIDERS
        .iter()
        .find(|(_, prefix)| building.starts_with(prefix))
        .map(|(sub_provider, _)| *sub_provider)
}

/// Resolve a sub-provider for a default provider and a source identifier
pub fn sub_provider_for(provider: &str, identifier: &str) -> Option<&'static str> {
    match provider {
        FLICKR_DEFAULT_PROVIDER => flickr_sub_provider(identifier),
        SMITHSONIAN_DEFAULT_PROVIDER => smithsonian_sub_provider(identifier),
        EUROPEANA_DEFAULT_PROVIDER => europeana_sub_provider(identifier),
        FINNISH_DEFAULT_PROVIDER => finnish_sub_provider(identifier),
        _ => None,
    }
}

/// User-Agent header for APIs that require it
pub fn user_agent(contact_email: Option<&str>) -> String {
    format!(
        "Openverse/0.1 (https://wordpress.org/openverse; {})",
        contact_email.unwrap_or("None")
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageCategory {
    Photograph,
    DigitizedArtwork,
    Illustration,
}

impl ImageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageCategory::Photograph => "photograph",
            ImageCategory::DigitizedArtwork => "digitized_artwork",
            ImageCategory::Illustration => "illustration",
        }
    }
}

impl std::fmt::Display for ImageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default image category by source
pub const DEFAULT_IMAGE_CATEGORY: &[(&str, ImageCategory)] = &[
    ("stocksnap", ImageCategory::Photograph),
    // Remains to be assigned
    ("animaldiversity", ImageCategory::Photograph),
    ("brooklynmuseum", ImageCategory::DigitizedArtwork),
    ("capl", ImageCategory::Photograph),
    ("clevelandmuseum", ImageCategory::DigitizedArtwork),
    ("deviantart", ImageCategory::DigitizedArtwork),
    ("digitaltmuseum", ImageCategory::DigitizedArtwork),
    ("floraon", ImageCategory::Photograph),
    ("inaturalist", ImageCategory::Photograph),
    ("mccordmuseum", ImageCategory::DigitizedArtwork),
    ("met", ImageCategory::DigitizedArtwork),
    ("museumsvictoria", ImageCategory::DigitizedArtwork),
    ("phylopic", ImageCategory::Illustration),
    ("rijksmuseum", ImageCategory::DigitizedArtwork),
    ("sciencemuseum", ImageCategory::Photograph),
    ("svgsilh", ImageCategory::Illustration),
    ("thorvaldsenmuseum", ImageCategory::DigitizedArtwork),
    ("worms", ImageCategory::Photograph),
];

pub fn default_image_category(source: &str) -> Option<ImageCategory> {
    DEFAULT_IMAGE_CATEGORY
        .iter()
        .find(|(name, _)| *name == source)
        .map(|(_, category)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flickr_sub_provider() {
        assert_eq!(flickr_sub_provider("24662369@N07"), Some("nasa"));
        assert_eq!(flickr_sub_provider("136485307@N06"), Some("nasa"));
        assert_eq!(flickr_sub_provider("130608600@N05"), Some("spacex"));
        assert_eq!(flickr_sub_provider("00000000@N00"), None);
    }

    #[test]
    fn test_smithsonian_sub_provider() {
        assert_eq!(
            smithsonian_sub_provider("NMNHBOTANY"),
            Some("smithsonian_national_museum_of_natural_history")
        );
        assert_eq!(smithsonian_sub_provider("OFEO-SG"), Some("smithsonian_gardens"));
        assert_eq!(smithsonian_sub_provider("nmnhbotany"), None);
    }

    #[test]
    fn test_europeana_and_finnish_sub_providers() {
        assert_eq!(
            europeana_sub_provider("Wellcome Collection"),
            Some("wellcome_collection")
        );
        assert_eq!(europeana_sub_provider("Rijksmuseum"), None);
        assert_eq!(
            finnish_sub_provider("0/Museovirasto/"),
            Some("finnish_heritage_agency")
        );
        assert_eq!(
            finnish_sub_provider("0/SA-kuva/1/Photos/"),
            Some("finnish_military_museum")
        );
        assert_eq!(finnish_sub_provider("1/Museovirasto/"), None);
    }

    #[test]
    fn test_sub_provider_for_dispatches_on_provider() {
        assert_eq!(sub_provider_for("flickr", "61021753@N02"), Some("bio_diversity"));
        assert_eq!(
            sub_provider_for("smithsonian", "SAAM"),
            Some("smithsonian_american_art_museum")
        );
        assert_eq!(sub_provider_for("jamendo", "SAAM"), None);
    }

    #[test]
    fn test_sub_provider_ids_are_unique() {
        let flickr_ids: usize = FLICKR_SUB_PROVIDERS.iter().map(|(_, ids)| ids.len()).sum();
        assert_eq!(FLICKR_OWNER_INDEX.len(), flickr_ids);

        let smithsonian_ids: usize = SMITHSONIAN_SUB_PROVIDERS
            .iter()
            .map(|(_, ids)| ids.len())
            .sum();
        assert_eq!(SMITHSONIAN_UNIT_INDEX.len(), smithsonian_ids);
    }

    #[test]
    fn test_default_image_category() {
        assert_eq!(default_image_category("met"), Some(ImageCategory::DigitizedArtwork));
        assert_eq!(default_image_category("phylopic"), Some(ImageCategory::Illustration));
        assert_eq!(default_image_category("flickr"), None);
        assert_eq!(ImageCategory::DigitizedArtwork.to_string(), "digitized_artwork");
    }

    #[test]
    fn test_user_agent() {
        assert_eq!(
            user_agent(Some("openverse@wordpress.org")),
            "Openverse/0.1 (https://wordpress.org/openverse; openverse@wordpress.org)"
        );
        assert_eq!(
            user_agent(None),
            "Openverse/0.1 (https://wordpress.org/openverse; None)"
        );
    }
}
