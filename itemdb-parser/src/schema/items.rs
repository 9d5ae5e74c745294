use crate::{
    cipher::KeySchedule,
    constants::{ITEM_NAME_ENCRYPTED_SINCE, ITEM_NAME_KEY},
    schema::{FieldDescriptor as F, Schema},
};

/// Built-in item layout, current up to format version 16.
///
/// `_unknown*` entries are fields whose meaning is not known. They are consumed to keep
/// the stream aligned and never stored.
pub fn item_schema() -> Schema {
    Schema::new([
        F::int("id", 4),
        F::int("properties", 2),
        F::int("type", 1),
        F::int("material", 1),
        F::string("name")
            .encrypted(ITEM_NAME_KEY)
            .key_schedule(KeySchedule::RecordIndex)
            .decrypt_from(ITEM_NAME_ENCRYPTED_SINCE),
        F::string("file_name"),
        F::int("file_hash", 4),
        F::int("visual_type", 1),
        F::int("cook_time", 4),
        F::int("tex_x", 1),
        F::int("tex_y", 1),
        F::int("storage_type", 1),
        F::int("layer", 1),
        F::int("collision_type", 1),
        F::int("hardness", 1),
        F::int("regen_time", 4),
        F::int("clothing_type", 1),
        F::int("rarity", 2),
        F::int("max_hold", 1),
        F::string("alt_file_path"),
        F::int("alt_file_hash", 4),
        F::int("anim_ms", 4),
        F::string("pet_name").since(4),
        F::string("pet_prefix").since(4),
        F::string("pet_suffix").since(4),
        F::string("pet_ability").since(5),
        F::int("seed_base", 1),
        F::int("seed_over", 1),
        F::int("tree_base", 1),
        F::int("tree_over", 1),
        F::int("bg_col", 4),
        F::int("fg_col", 4),
        F::int("seed1", 2),
        F::int("seed2", 2),
        F::int("bloom_time", 4),
        F::int("anim_type", 4).since(7),
        F::string("anim_string").since(7),
        F::string("anim_tex").since(8),
        F::string("anim_string2").since(8),
        F::int("dlayer1", 4).since(8),
        F::int("dlayer2", 4).since(8),
        F::int("properties2", 2).since(9),
        F::ignored("_unknown1", 62).since(9),
        F::int("tile_range", 4).since(10),
        F::int("pile_range", 4).since(10),
        F::string("custom_punch").since(11),
        F::ignored("_unknown2", 13).since(12),
        F::int("clock_div", 4).since(13),
        F::int("parent_id", 4).since(14),
        F::ignored("_unknown3", 25).since(15),
        F::string("alt_sit_path").since(15),
        F::ignored_string("_unknown4").since(16),
    ])
    .with_index_field("id")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::constants::LATEST_KNOWN_VERSION;

    #[test]
    fn id_is_first_and_checked() {
        let s = item_schema();
        assert_eq!(s.fields()[0].name, "id");
        assert_eq!(s.index_field().map(|f| f.name.as_ref()), Some("id"));
    }

    #[test]
    fn only_name_is_encrypted() {
        let s = item_schema();
        let keyed: Vec<_> = s
            .fields()
            .iter()
            .filter(|f| f.decryption.is_some())
            .map(|f| f.name.as_ref())
            .collect();
        assert_eq!(keyed, vec!["name"]);
        let name = s.field("name").unwrap();
        assert!(name.decryption_for(2).is_none());
        assert_eq!(
            name.decryption_for(3).map(|d| d.schedule),
            Some(KeySchedule::RecordIndex)
        );
    }

    #[test]
    fn column_counts_grow_with_version() {
        let s = item_schema();
        assert_eq!(s.columns(1).len(), 31);
        assert_eq!(s.columns(4).len(), 34);
        assert_eq!(s.columns(LATEST_KNOWN_VERSION).len(), 48);
        assert!(!s.columns(LATEST_KNOWN_VERSION).contains(&"_unknown4"));
    }

    #[test]
    fn names_are_unique() {
        let s = item_schema();
        let mut names: Vec<_> = s.fields().iter().map(|f| f.name.as_ref()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), s.len());
    }
}
