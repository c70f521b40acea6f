//! A pool of worker threads planning structures in the background. The catalog and the
//! height oracle are shared by all workers, each planning owns its own random source,
//! frontier and free space, so structures are planned independently. Planned structures
//! are sent back to the owner of the pool that commits them on its own thread.

use std::sync::Arc;
use std::thread;
use std::io;

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use tracing::trace;

use crate::jigsaw::{JigsawConfig, JigsawError, JigsawPlacer, PlannedStructure};
use crate::height::HeightOracle;
use crate::pool::PoolCatalog;


/// Worker threads planning structures, requests are tagged so that the owner can
/// associate each result to its request, because results come in completion order.
pub struct PlannerPool<T> {
    request_sender: Sender<PlanRequest<T>>,
    result_receiver: Receiver<PlanResult<T>>,
}

impl<T: Send + 'static> PlannerPool<T> {

    /// Start the given number of worker threads (at least one), sharing the catalog and
    /// the height oracle.
    pub fn new<H>(catalog: Arc<PoolCatalog>, oracle: Arc<H>, workers_count: usize) -> io::Result<Self>
    where
        H: HeightOracle + Send + Sync + 'static,
    {

        let workers_count = workers_count.max(1);

        let (
            request_sender,
            request_receiver,
        ) = bounded(workers_count * 100);

        let (
            result_sender,
            result_receiver,
        ) = bounded(workers_count * 100);

        for i in 0..workers_count {

            let worker = Worker {
                catalog: Arc::clone(&catalog),
                oracle: Arc::clone(&oracle),
                request_receiver: request_receiver.clone(),
                result_sender: result_sender.clone(),
            };

            thread::Builder::new()
                .name(format!("Structure Planner Thread #{i}"))
                .spawn(move || worker.run())?;

        }

        Ok(Self {
            request_sender,
            result_receiver,
        })

    }

    /// Request a structure to be planned, this function returns true if the request has
    /// been successfully enqueued.
    pub fn request(&self, tag: T, config: JigsawConfig) -> bool {
        match self.request_sender.try_send(PlanRequest { tag, config }) {
            Ok(_) => true,
            Err(TrySendError::Full(_)) => false,
            Err(TrySendError::Disconnected(_)) => panic!("worker thread should not disconnect"),
        }
    }

    /// Poll the next available result, if any.
    pub fn poll(&self) -> Option<PlanResult<T>> {
        match self.result_receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => panic!("worker thread should not disconnect"),
        }
    }

    /// Block until the next result is available.
    pub fn recv(&self) -> PlanResult<T> {
        self.result_receiver.recv().expect("worker thread should not disconnect")
    }

}


/// The result of a planning request.
#[derive(Debug)]
pub struct PlanResult<T> {
    /// The tag given with the request.
    pub tag: T,
    pub result: Result<Option<PlannedStructure>, JigsawError>,
}

struct PlanRequest<T> {
    tag: T,
    config: JigsawConfig,
}

struct Worker<T, H> {
    catalog: Arc<PoolCatalog>,
    oracle: Arc<H>,
    request_receiver: Receiver<PlanRequest<T>>,
    result_sender: Sender<PlanResult<T>>,
}

impl<T, H: HeightOracle> Worker<T, H> {

    /// Run the worker until the requests channel is disconnected.
    fn run(self) {
        let placer = JigsawPlacer::new(&self.catalog, &*self.oracle);
        while let Ok(PlanRequest { tag, config }) = self.request_receiver.recv() {
            trace!("planning {} at {}", config.start_pool, config.pos);
            let result = placer.plan(&config);
            // If the owner has been dropped, there is no need to continue.
            if self.result_sender.send(PlanResult { tag, result }).is_err() {
                break;
            }
        }
    }

}


#[cfg(test)]
mod tests {

    use glam::IVec3;

    use crate::pool::{PoolElement, TemplatePool, TemplateRegistry};
    use crate::template::{JigsawMarker, Template};
    use crate::height::FlatHeight;
    use crate::geom::Face;
    use crate::ident::Ident;

    use super::*;

    fn catalog() -> PoolCatalog {

        let mut registry = TemplateRegistry::new();
        let mut marker = JigsawMarker::new(IVec3::new(2, 0, 1), Face::PosX);
        marker.name = "link".to_string();
        marker.target = "link".to_string();
        marker.pool = "test:rooms".to_string();
        let room = registry.register(Template::new(Ident::parse("room").unwrap(), IVec3::new(3, 3, 3), vec![marker]).unwrap()).unwrap();

        let mut catalog = PoolCatalog::new();
        catalog.register(Ident::parse("test:rooms").unwrap(), TemplatePool::new(Ident::EMPTY_POOL, vec![(PoolElement::single(room), 1)]).unwrap()).unwrap();
        catalog

    }

    #[test]
    fn same_as_direct() {

        let catalog = Arc::new(catalog());
        let oracle = Arc::new(FlatHeight::new(64));
        let pool = PlannerPool::new(Arc::clone(&catalog), Arc::clone(&oracle), 3).unwrap();

        let configs = (0..12)
            .map(|i| JigsawConfig::new(Ident::parse("test:rooms").unwrap(), IVec3::new(i * 100, 64, 0)).with_seed(i as i64))
            .collect::<Vec<_>>();

        for (i, config) in configs.iter().enumerate() {
            assert!(pool.request(i, config.clone()));
        }

        let placer = JigsawPlacer::new(&*catalog, &*oracle);
        let mut received = vec![false; configs.len()];

        for _ in 0..configs.len() {
            let PlanResult { tag, result } = pool.recv();
            let planned = result.unwrap().unwrap();
            let direct = placer.plan(&configs[tag]).unwrap().unwrap();
            assert_eq!(planned.pieces().len(), direct.pieces().len());
            assert_eq!(planned.bounds(), direct.bounds());
            received[tag] = true;
        }

        assert!(received.iter().all(|&r| r));
        assert!(pool.poll().is_none());

    }

}
