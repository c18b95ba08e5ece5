//! 人员记录数据模型
//!
//! 服务唯一持久化的实体。

use chrono::{DateTime, SubsecRound, Utc};
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, StreetName};
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 人员记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// 记录唯一标识，创建时生成，不可变
    pub id: Uuid,

    /// 姓名
    pub name: String,

    /// 年龄
    pub age: i32,

    /// 地址
    pub address: String,

    /// 电话号码
    pub phone_number: String,

    /// 创建时间
    pub created_at: DateTime<Utc>,

    /// 更新时间
    pub updated_at: DateTime<Utc>,
}

/// 经过校验的新记录字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub name: String,
    pub age: i32,
    pub address: String,
    pub phone_number: String,
}

impl Record {
    /// 创建新记录，分配 ID 与时间戳
    pub fn new(fields: NewRecord) -> Self {
        // PostgreSQL 时间戳精度为微秒
        let now = Utc::now().trunc_subsecs(6);
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            age: fields.age,
            address: fields.address,
            phone_number: fields.phone_number,
            created_at: now,
            updated_at: now,
        }
    }

    /// 生成随机数据记录
    pub fn fake() -> Self {
        let building: String = BuildingNumber().fake();
        let street: String = StreetName().fake();
        let city: String = CityName().fake();

        Self::new(NewRecord {
            name: Name().fake(),
            age: (18..90).fake::<i32>(),
            address: format!("{building} {street}, {city}"),
            phone_number: PhoneNumber().fake(),
        })
    }
}
