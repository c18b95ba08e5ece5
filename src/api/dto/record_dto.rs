//! 人员记录 DTO
//!
//! 请求字段在解码阶段均为可选，缺失字段由校验阶段报告。

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::api::pipeline::PipelineError;
use crate::models::record::{NewRecord, Record};

/// 电话号码允许的字符
static PHONE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+()\-. x#]+$").expect("phone number pattern is valid"));

/// 拒绝只含空白字符的值
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// 创建记录请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    /// 姓名
    #[validate(
        required(message = "name is required"),
        length(min = 1, max = 255, message = "name must be 1-255 characters"),
        custom(function = "not_blank", message = "name must not be blank")
    )]
    pub name: Option<String>,

    /// 年龄
    #[validate(
        required(message = "age is required"),
        range(min = 0, max = 150, message = "age must be between 0 and 150")
    )]
    pub age: Option<i32>,

    /// 地址
    #[validate(
        required(message = "address is required"),
        length(min = 1, max = 512, message = "address must be 1-512 characters"),
        custom(function = "not_blank", message = "address must not be blank")
    )]
    pub address: Option<String>,

    /// 电话号码
    #[serde(rename = "phoneNumber")]
    #[validate(
        required(message = "phoneNumber is required"),
        length(min = 3, max = 32, message = "phoneNumber must be 3-32 characters"),
        regex(path = *PHONE_NUMBER, message = "phoneNumber contains invalid characters")
    )]
    pub phone_number: Option<String>,
}

impl CreateRecordRequest {
    /// 转换为校验后的字段
    pub fn into_new_record(self) -> Result<NewRecord, PipelineError> {
        let (Some(name), Some(age), Some(address), Some(phone_number)) =
            (self.name, self.age, self.address, self.phone_number)
        else {
            return Err(PipelineError::Validation(
                "payload has not been validated".into(),
            ));
        };

        Ok(NewRecord {
            name,
            age,
            address,
            phone_number,
        })
    }
}

/// 记录响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub address: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Record> for RecordResponse {
    fn from(record: Record) -> Self {
        Self {
            id: record.id,
            name: record.name,
            age: record.age,
            address: record.address,
            phone_number: record.phone_number,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
