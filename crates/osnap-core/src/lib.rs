//! OSNAP 对象捕捉解析引擎
//!
//! 交互式2D绘图面的捕捉子系统：给定光标位置和一组几何
//! 实体，确定性地解析出光标应当锁定的唯一"最佳"捕捉点
//! （端点、中点、交点、垂足、切点、延伸点、插入点、
//! 网格点等）。
//!
//! # 架构设计
//!
//! 自底向上：
//! - `kernel`: 纯几何数学（距离、投影、求交），无状态
//! - `spatial`: 网格分桶的捕捉点索引，近邻查询
//! - `engines`: 每种捕捉模式一个引擎，产出带类型的候选
//! - `resolver`: 编排器 + 解析策略，四键全序排序选出唯一赢家
//! - `tolerance`: 像素孔径到世界半径的换算，逐帧重算
//! - `session`: 会话状态，显式拥有、按引用传入，无全局单例
//!
//! # 示例
//!
//! ```rust
//! use osnap_core::prelude::*;
//!
//! // 一条线段
//! let entities = vec![Entity::new(Geometry::Line(Line::new(
//!     Point2::new(0.0, 0.0),
//!     Point2::new(100.0, 50.0),
//! )))];
//!
//! let mut resolver = SnapResolver::default();
//! let mut session = SnapSessionState::default();
//!
//! // 光标靠近起点：解析到端点
//! let snap = resolver.resolve(Point2::new(1.0, 1.0), 1.0, &entities, &mut session);
//! assert_eq!(snap.unwrap().mode, SnapMode::Endpoint);
//! ```

pub mod engines;
pub mod entity;
pub mod geometry;
pub mod kernel;
pub mod math;
pub mod resolver;
pub mod session;
pub mod snap;
pub mod spatial;
pub mod tolerance;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::engines::{SnapContext, SnapEngine};
    pub use crate::entity::{Entity, EntityId};
    pub use crate::geometry::{
        Arc, Circle, Dimension, Ellipse, Geometry, Hatch, Insert, Leader, Line, Point, Polyline,
        PolylineVertex, Rectangle, Spline, Text,
    };
    pub use crate::math::{BoundingBox2, Point2, Vector2};
    pub use crate::resolver::SnapResolver;
    pub use crate::session::SnapSessionState;
    pub use crate::snap::{
        SnapCandidate, SnapConfig, SnapConfigError, SnapMode, SnapModeSet,
    };
    pub use crate::spatial::SpatialIndex;
    pub use crate::tolerance::ToleranceModel;
}
