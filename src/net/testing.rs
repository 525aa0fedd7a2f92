//! Scripted transport shared by the network-layer tests.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::future::LocalBoxFuture;

use super::http::{Http, HttpError, HttpRequest, HttpResponse};

/// Transport driven by a synchronous responder closure.
///
/// Each send yields to the executor once before resolving so concurrently
/// spawned requests interleave the way in-flight browser fetches do.
pub struct MockHttp {
    pub log: Rc<RefCell<Vec<HttpRequest>>>,
    responder: Rc<dyn Fn(&HttpRequest) -> Result<HttpResponse, HttpError>>,
}

impl MockHttp {
    pub fn new(
        responder: impl Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + 'static,
    ) -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            responder: Rc::new(responder),
        }
    }

    /// Number of requests whose URL contains the given fragment.
    pub fn calls_to(&self, fragment: &str) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|req| req.url.contains(fragment))
            .count()
    }
}

impl Http for MockHttp {
    fn send(&self, req: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, HttpError>> {
        self.log.borrow_mut().push(req.clone());
        let responder = Rc::clone(&self.responder);
        Box::pin(async move {
            yield_once().await;
            responder(&req)
        })
    }
}

pub fn respond(status: u16, body: &str) -> Result<HttpResponse, HttpError> {
    Ok(HttpResponse { status, body: body.to_owned() })
}

/// Suspend once so the local executor can run other ready tasks first.
pub fn yield_once() -> YieldOnce {
    YieldOnce { polled: false }
}

pub struct YieldOnce {
    polled: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.polled {
            Poll::Ready(())
        } else {
            self.polled = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}
