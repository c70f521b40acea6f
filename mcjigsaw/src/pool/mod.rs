//! Template pools and the read-only catalogs of templates and pools used by the planner.

use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

use crate::geom::Rotation;
use crate::template::Template;
use crate::util::JavaRandom;
use crate::ident::Ident;

pub mod element;
pub mod alias;

pub use element::{PoolElement, ElementKind, SingleElement, Projection};
pub use alias::{PoolAliasBinding, PoolAliasLookup};


/// Maximum weight of an element in a pool.
pub const MAX_WEIGHT: u32 = 150;

/// A function building an element for the projection of the pool it is added to.
pub type ElementFactory = Box<dyn FnOnce(Projection) -> PoolElement + Send>;


/// A pool of elements, each element is repeated as many times as its weight, so that
/// uniform draws and shuffles are weighted. The fallback pool is used when the depth
/// budget is exhausted or when no element of this pool fits.
#[derive(Debug)]
pub struct TemplatePool {
    fallback: Ident,
    /// Distinct elements with their weight, in definition order.
    weighted: Vec<(Arc<PoolElement>, u32)>,
    /// Every element repeated by its weight.
    templates: Vec<Arc<PoolElement>>,
    /// The greatest Y span of non-empty elements.
    max_size: i32,
}

impl TemplatePool {

    /// Create a new pool from weighted elements, each weight must be in `1..=150`.
    pub fn new(fallback: Ident, elements: Vec<(PoolElement, u32)>) -> Result<Self, PoolError> {

        let mut weighted = Vec::with_capacity(elements.len());
        let mut templates = Vec::new();
        let mut max_size = 0;

        for (element, weight) in elements {

            if !(1..=MAX_WEIGHT).contains(&weight) {
                return Err(PoolError::IllegalWeight(element.to_string(), weight));
            }

            if !element.is_empty() {
                max_size = max_size.max(element.bounding_box(glam::IVec3::ZERO, Rotation::None).y_span());
            }

            let element = Arc::new(element);
            templates.extend(std::iter::repeat_n(Arc::clone(&element), weight as usize));
            weighted.push((element, weight));

        }

        Ok(Self {
            fallback,
            weighted,
            templates,
            max_size,
        })

    }

    /// Create a new pool from element factories, all elements get the given projection.
    pub fn from_factories<I>(fallback: Ident, factories: I, projection: Projection) -> Result<Self, PoolError>
    where
        I: IntoIterator<Item = (ElementFactory, u32)>,
    {
        Self::new(fallback, factories.into_iter()
            .map(|(factory, weight)| (factory(projection), weight))
            .collect())
    }

    /// The pool with no element, that is its own fallback.
    pub fn empty() -> Self {
        Self {
            fallback: Ident::EMPTY_POOL,
            weighted: Vec::new(),
            templates: Vec::new(),
            max_size: 0,
        }
    }

    #[inline]
    pub fn fallback(&self) -> &Ident {
        &self.fallback
    }

    /// Distinct elements of this pool with their weights.
    #[inline]
    pub fn elements(&self) -> &[(Arc<PoolElement>, u32)] {
        &self.weighted
    }

    /// Number of elements, counting each element as many times as its weight.
    #[inline]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The greatest Y span of the non-empty elements of this pool, unrotated.
    #[inline]
    pub fn max_size(&self) -> i32 {
        self.max_size
    }

    /// Draw a random element, none is returned and no random is consumed if the pool
    /// is empty.
    pub fn random_element(&self, rand: &mut JavaRandom) -> Option<&Arc<PoolElement>> {
        if self.templates.is_empty() {
            None
        } else {
            Some(&self.templates[rand.next_int_bounded(self.templates.len() as i32) as usize])
        }
    }

    /// Return a shuffled copy of the weighted elements.
    pub fn shuffled_elements(&self, rand: &mut JavaRandom) -> Vec<Arc<PoolElement>> {
        let mut templates = self.templates.clone();
        rand.shuffle(&mut templates);
        templates
    }

}


/// The registry of all templates, referenced by identifier when building pools.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: IndexMap<Ident, Arc<Template>>,
}

impl TemplateRegistry {

    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template and return a shared handle to it.
    pub fn register(&mut self, template: Template) -> Result<Arc<Template>, CatalogError> {
        let id = template.id().clone();
        if self.templates.contains_key(&id) {
            return Err(CatalogError::DuplicateTemplate(id));
        }
        let template = Arc::new(template);
        self.templates.insert(id, Arc::clone(&template));
        Ok(template)
    }

    /// Get a shared handle to a template, failing if it has not been registered.
    pub fn get(&self, id: &Ident) -> Result<Arc<Template>, CatalogError> {
        self.templates.get(id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownTemplate(id.clone()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Template>> {
        self.templates.values()
    }

}


/// The read-only catalog of pools used while planning structures, it can be shared
/// between threads once built. The empty pool is always registered.
#[derive(Debug)]
pub struct PoolCatalog {
    pools: IndexMap<Ident, TemplatePool>,
}

impl Default for PoolCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolCatalog {

    pub fn new() -> Self {
        let mut pools = IndexMap::new();
        pools.insert(Ident::EMPTY_POOL, TemplatePool::empty());
        Self { pools }
    }

    /// Register a pool under the given key, the key must not already be used.
    pub fn register(&mut self, key: Ident, pool: TemplatePool) -> Result<(), CatalogError> {
        if key == Ident::EMPTY_POOL {
            return Err(CatalogError::ReservedPool(key));
        } else if self.pools.contains_key(&key) {
            return Err(CatalogError::DuplicatePool(key));
        }
        self.pools.insert(key, pool);
        Ok(())
    }

    #[inline]
    pub fn get(&self, key: &Ident) -> Option<&TemplatePool> {
        self.pools.get(key)
    }

    #[inline]
    pub fn contains(&self, key: &Ident) -> bool {
        self.pools.contains_key(key)
    }

    /// Iterate over all pools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Ident, &TemplatePool)> {
        self.pools.iter()
    }

}


/// Errors when building pools or elements.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("illegal weight {1} for element {0}, expected 1..=150")]
    IllegalWeight(String, u32),
    #[error("list element must have at least one element")]
    EmptyList,
    #[error("pool alias {0} is bound more than once")]
    DuplicateAlias(Ident),
    #[error("total weight {0} of a pool alias binding exceeds 2147483647")]
    AliasWeightOverflow(u64),
}

/// Errors when registering templates and pools.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("template {0} is already registered")]
    DuplicateTemplate(Ident),
    #[error("unknown template {0}")]
    UnknownTemplate(Ident),
    #[error("pool {0} is already registered")]
    DuplicatePool(Ident),
    #[error("pool {0} is reserved")]
    ReservedPool(Ident),
    #[error("pool: {0}")]
    Pool(#[from] PoolError),
}


#[cfg(test)]
mod tests {

    use glam::IVec3;

    use super::*;

    fn registry() -> TemplateRegistry {
        let mut registry = TemplateRegistry::new();
        registry.register(Template::new(Ident::parse("small").unwrap(), IVec3::new(1, 2, 1), vec![]).unwrap()).unwrap();
        registry.register(Template::new(Ident::parse("tall").unwrap(), IVec3::new(2, 7, 3), vec![]).unwrap()).unwrap();
        registry
    }

    #[test]
    fn weights() {

        let registry = registry();
        let small = PoolElement::single(registry.get(&Ident::parse("small").unwrap()).unwrap());
        let tall = PoolElement::single(registry.get(&Ident::parse("tall").unwrap()).unwrap());

        let pool = TemplatePool::new(Ident::EMPTY_POOL, vec![
            (small, 3),
            (tall, 1),
            (PoolElement::empty(), 2),
        ]).unwrap();

        assert_eq!(pool.len(), 6);
        assert_eq!(pool.elements().len(), 3);
        assert_eq!(pool.max_size(), 7);

        let shuffled = pool.shuffled_elements(&mut JavaRandom::new(42));
        assert_eq!(shuffled.len(), 6);
        assert_eq!(shuffled.iter().filter(|e| e.is_empty()).count(), 2);

        assert!(matches!(
            TemplatePool::new(Ident::EMPTY_POOL, vec![(PoolElement::empty(), 0)]),
            Err(PoolError::IllegalWeight(_, 0))));
        assert!(matches!(
            TemplatePool::new(Ident::EMPTY_POOL, vec![(PoolElement::empty(), 151)]),
            Err(PoolError::IllegalWeight(_, 151))));

    }

    #[test]
    fn random_element() {

        let pool = TemplatePool::empty();
        let mut rand = JavaRandom::new(42);
        assert!(pool.random_element(&mut rand).is_none());
        // No random consumed by empty pools.
        assert_eq!(rand.get_seed(), JavaRandom::new(42).get_seed());

        let registry = registry();
        let pool = TemplatePool::new(Ident::EMPTY_POOL, (0..16)
            .map(|_| (PoolElement::single(registry.get(&Ident::parse("small").unwrap()).unwrap()), 1))
            .collect()).unwrap();

        // Java's random with seed 42 gives 11 for a bound of 16.
        let element = pool.random_element(&mut JavaRandom::new(42)).unwrap();
        assert!(Arc::ptr_eq(element, &pool.elements()[11].0));

    }

    #[test]
    fn factories() {

        let registry = registry();
        let template = registry.get(&Ident::parse("small").unwrap()).unwrap();
        let factories: Vec<(ElementFactory, u32)> = vec![
            (Box::new(move |projection| PoolElement::single(template).with_projection(projection)), 1),
            (Box::new(|_| PoolElement::empty()), 1),
        ];

        let pool = TemplatePool::from_factories(Ident::EMPTY_POOL, factories, Projection::TerrainMatching).unwrap();
        assert_eq!(pool.elements()[0].0.projection(), Projection::TerrainMatching);

    }

    #[test]
    fn catalog() {

        let mut catalog = PoolCatalog::new();
        assert!(catalog.get(&Ident::EMPTY_POOL).is_some_and(|pool| pool.is_empty() && pool.fallback() == &Ident::EMPTY_POOL));

        let key = Ident::parse("test:pool").unwrap();
        catalog.register(key.clone(), TemplatePool::empty()).unwrap();
        assert!(matches!(catalog.register(key.clone(), TemplatePool::empty()), Err(CatalogError::DuplicatePool(_))));
        assert!(matches!(catalog.register(Ident::EMPTY_POOL, TemplatePool::empty()), Err(CatalogError::ReservedPool(_))));
        assert!(catalog.contains(&key));

        let mut registry = registry();
        assert!(matches!(registry.register(Template::new(Ident::parse("small").unwrap(), IVec3::ONE, vec![]).unwrap()), Err(CatalogError::DuplicateTemplate(_))));
        assert!(matches!(registry.get(&Ident::parse("missing").unwrap()), Err(CatalogError::UnknownTemplate(_))));

        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PoolCatalog>();

    }

}
