//! 명령 이름 → 동작 레지스트리.
//! 시작 시 한 번 구성되고 세션 동안 변경되지 않는다.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::application::capabilities::Capabilities;
use crate::application::error::ExecutionError;
use crate::application::ports::CommandBehavior;

/// 호스트 클로저가 반환하는 동작 future.
pub type BehaviorFuture<'a> = BoxFuture<'a, Result<(), ExecutionError>>;

/// 등록 순서를 보존하는 불변 명령 맵.
pub struct Registry {
    order: Vec<String>,
    behaviors: HashMap<String, Box<dyn CommandBehavior>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// 정확히 일치하는 이름만 찾는다(접두어/대소문자 무시 없음).
    pub fn resolve(&self, name: &str) -> Option<&dyn CommandBehavior> {
        self.behaviors.get(name).map(|behavior| behavior.as_ref())
    }

    /// 등록 순서대로 명령 이름을 돌려준다.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[derive(Default)]
pub struct RegistryBuilder {
    order: Vec<String>,
    behaviors: HashMap<String, Box<dyn CommandBehavior>>,
}

impl RegistryBuilder {
    /// 동작을 등록한다. 같은 이름이 다시 오면 나중 값이 이기고
    /// 목록 위치는 처음 등록된 자리를 유지한다.
    pub fn insert(&mut self, name: impl Into<String>, behavior: Box<dyn CommandBehavior>) {
        let name = name.into();
        if self.behaviors.insert(name.clone(), behavior).is_none() {
            self.order.push(name);
        }
    }

    pub fn register<B>(mut self, name: impl Into<String>, behavior: B) -> Self
    where
        B: CommandBehavior + 'static,
    {
        self.insert(name, Box::new(behavior));
        self
    }

    /// 호스트 클로저를 동작으로 등록한다.
    pub fn command<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: for<'a> Fn(&'a Capabilities) -> BehaviorFuture<'a> + Send + Sync + 'static,
    {
        self.register(name, FnBehavior(f))
    }

    pub fn build(self) -> Registry {
        Registry {
            order: self.order,
            behaviors: self.behaviors,
        }
    }
}

struct FnBehavior<F>(F);

#[async_trait]
impl<F> CommandBehavior for FnBehavior<F>
where
    F: for<'a> Fn(&'a Capabilities) -> BehaviorFuture<'a> + Send + Sync,
{
    async fn run(&self, caps: &Capabilities) -> Result<(), ExecutionError> {
        (self.0)(caps).await
    }
}
