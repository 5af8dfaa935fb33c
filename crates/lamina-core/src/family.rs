//! Ancestor/descendant relation tags.
//!
//! The family marker tags a target entity and its transitive parents and
//! children so renderers can highlight the dependency closure of an alerted
//! host. The marker itself lives in the engine crate; this module holds the
//! tag types and the [`Relatable`] trait it walks over, so both the
//! assembler's graph records and the nested view's arena records can be
//! marked with the same algorithm.

use serde::{Deserialize, Serialize};

/// Which side of the target a marked entity sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Target,
    Parents,
    Children,
}

/// A family tag on a visited entity.
///
/// `degree` is the traversal depth from the target (zero for the target
/// itself). It is carried for rendering, for example to fade highlights by
/// distance, and has no algorithmic meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRelation {
    pub relation: Relation,
    pub degree: u32,
}

impl FamilyRelation {
    /// Tag for the target entity itself.
    pub fn target() -> Self {
        FamilyRelation {
            relation: Relation::Target,
            degree: 0,
        }
    }

    /// Tag for an entity reached over `degree` parent edges.
    pub fn parents(degree: u32) -> Self {
        FamilyRelation {
            relation: Relation::Parents,
            degree,
        }
    }

    /// Tag for an entity reached over `degree` child edges.
    pub fn children(degree: u32) -> Self {
        FamilyRelation {
            relation: Relation::Children,
            degree,
        }
    }
}

/// An entity the family marker can traverse.
///
/// `parents` and `children` return paths into the same collection the
/// entity lives in; the marker resolves them through a lookup table it
/// builds once per run.
pub trait Relatable {
    /// Globally unique path of this entity.
    fn path(&self) -> &str;

    /// Display name (the last path segment).
    fn name(&self) -> &str;

    /// Paths of entities this one is supported by (lower layers).
    fn children(&self) -> &[String];

    /// Paths of entities supported by this one (higher layers).
    fn parents(&self) -> &[String];

    /// Attach or replace the family tag.
    fn set_family(&mut self, family: FamilyRelation);
}

impl<T: Relatable> Relatable for &mut T {
    fn path(&self) -> &str {
        (**self).path()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn children(&self) -> &[String] {
        (**self).children()
    }

    fn parents(&self) -> &[String] {
        (**self).parents()
    }

    fn set_family(&mut self, family: FamilyRelation) {
        (**self).set_family(family);
    }
}
