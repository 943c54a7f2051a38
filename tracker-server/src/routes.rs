use std::convert::Infallible;

use tracker_core::IngestRequest;
use warp::Filter;

use crate::{SharedTracker, handlers, handlers::NotesQuery};

/// All routes of the service, traced per request.
pub fn routes(
    tracker: SharedTracker,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let ingest = warp::post()
        .and(warp::path("ingest"))
        .and(warp::path::end())
        .and(warp::query::<IngestRequest>())
        .and(with_tracker(tracker.clone()))
        .and_then(handlers::ingest);

    let list = warp::get()
        .and(warp::path("observations"))
        .and(warp::path::end())
        .and(with_tracker(tracker.clone()))
        .and_then(handlers::list);

    let get = warp::get()
        .and(warp::path!("observations" / i64))
        .and(with_tracker(tracker.clone()))
        .and_then(handlers::get);

    let update = warp::put()
        .and(warp::path!("observations" / i64))
        .and(warp::query::<NotesQuery>())
        .and(with_tracker(tracker.clone()))
        .and_then(handlers::update);

    let delete = warp::delete()
        .and(warp::path!("observations" / i64))
        .and(with_tracker(tracker))
        .and_then(handlers::delete);

    ingest.or(list).or(get).or(update).or(delete).with(warp::trace::request())
}

fn with_tracker(
    tracker: SharedTracker,
) -> impl Filter<Extract = (SharedTracker,), Error = Infallible> + Clone {
    warp::any().map(move || tracker.clone())
}
