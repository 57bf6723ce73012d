//! Supported-plant catalog.
//!
//! The identification model was trained on these houseplant types; the
//! selection endpoint only accepts entries from this list. A subset of the
//! catalog additionally has a plant-specific disease model.

/// Plant types the identification model can distinguish.
pub const SUPPORTED_PLANTS: &[&str] = &[
    "African Violet",
    "Aloe Vera",
    "Anthurium",
    "Begonia",
    "Boston Fern",
    "Cactus",
    "Calathea",
    "Cast Iron Plant",
    "Chinese Evergreen",
    "Chinese Money Plant",
    "Christmas Cactus",
    "Chrysanthemum",
    "Dieffenbachia",
    "Dracaena",
    "Elephant Ear",
    "English Ivy",
    "Jade Plant",
    "Monstera",
    "Money Tree",
    "Orchid",
    "Palm",
    "Peace Lily",
    "Poinsettia",
    "Polka Dot Plant",
    "Pothos",
    "Prayer Plant",
    "Rubber Plant",
    "Schefflera",
    "Snake Plant",
    "Spiderwort",
    "Succulent",
    "ZZ Plant",
];

/// Plant types that have a dedicated disease model; the rest fall back to
/// the general disease model.
pub const SPECIFIC_DISEASE_MODEL_PLANTS: &[&str] = &[
    "Aloe Vera",
    "Cactus",
    "Orchid",
    "Peace Lily",
    "Snake Plant",
    "Succulent",
];

/// Whether the identification model knows this plant type.
#[must_use]
pub fn is_supported(plant_type: &str) -> bool {
    SUPPORTED_PLANTS.contains(&plant_type)
}

/// Whether a dedicated disease model exists for this plant type.
#[must_use]
pub fn has_specific_disease_model(plant_type: &str) -> bool {
    SPECIFIC_DISEASE_MODEL_PLANTS.contains(&plant_type)
}
