//! Fusion Tables API v2
//!
//! Tables, columns, styles and templates, plus SQL queries over table rows.

use crate::error::Result;
use crate::gcp::transport::Transport;
use crate::model::fusiontables::{
    Column, ColumnList, Import, Sqlresponse, StyleSetting, StyleSettingList, Table, TableList,
    Task, TaskList, Template, TemplateList,
};
use crate::resource::registry::{builtin_service, ServiceDef};
use crate::resource::{InvocationArgs, OptParams, Resource, ResourceInvoker};

/// Typed client for the Fusion Tables API v2
pub struct FusiontablesService<T> {
    invoker: ResourceInvoker<T>,
    service: &'static ServiceDef,
}

impl<T: Transport> FusiontablesService<T> {
    pub fn new(transport: T) -> Self {
        Self::with_invoker(ResourceInvoker::new(transport))
    }

    pub fn with_invoker(invoker: ResourceInvoker<T>) -> Self {
        Self {
            invoker,
            service: builtin_service("fusiontables"),
        }
    }

    pub fn invoker(&self) -> &ResourceInvoker<T> {
        &self.invoker
    }

    pub fn service(&self) -> &'static ServiceDef {
        self.service
    }

    pub fn column(&self) -> ColumnResource<'_, T> {
        ColumnResource(self.invoker.resource(self.service, "column"))
    }

    pub fn query(&self) -> QueryResource<'_, T> {
        QueryResource(self.invoker.resource(self.service, "query"))
    }

    pub fn style(&self) -> StyleResource<'_, T> {
        StyleResource(self.invoker.resource(self.service, "style"))
    }

    pub fn table(&self) -> TableResource<'_, T> {
        TableResource(self.invoker.resource(self.service, "table"))
    }

    pub fn task(&self) -> TaskResource<'_, T> {
        TaskResource(self.invoker.resource(self.service, "task"))
    }

    pub fn template(&self) -> TemplateResource<'_, T> {
        TemplateResource(self.invoker.resource(self.service, "template"))
    }
}

pub struct ColumnResource<'a, T>(Resource<'a, T>);

impl<T: Transport> ColumnResource<'_, T> {
    pub async fn delete(
        &self,
        table_id: &str,
        column_id: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with("columnId", column_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(
        &self,
        table_id: &str,
        column_id: &str,
        opt_params: OptParams,
    ) -> Result<Column> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with("columnId", column_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn insert(
        &self,
        table_id: &str,
        body: &Column,
        opt_params: OptParams,
    ) -> Result<Column> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with_body(body)?;
        self.0.call("insert", args.merge(opt_params)).await
    }

    pub async fn list(&self, table_id: &str, opt_params: OptParams) -> Result<ColumnList> {
        let args = InvocationArgs::new().with("tableId", table_id);
        self.0.call("list", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        table_id: &str,
        column_id: &str,
        body: &Column,
        opt_params: OptParams,
    ) -> Result<Column> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with("columnId", column_id)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        table_id: &str,
        column_id: &str,
        body: &Column,
        opt_params: OptParams,
    ) -> Result<Column> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with("columnId", column_id)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }
}

pub struct QueryResource<'a, T>(Resource<'a, T>);

impl<T: Transport> QueryResource<'_, T> {
    /// Run an SQL statement, which may modify data
    pub async fn sql(&self, sql: &str, opt_params: OptParams) -> Result<Sqlresponse> {
        let args = InvocationArgs::new().with("sql", sql);
        self.0.call("sql", args.merge(opt_params)).await
    }

    /// Run a read-only SQL statement
    pub async fn sql_get(&self, sql: &str, opt_params: OptParams) -> Result<Sqlresponse> {
        let args = InvocationArgs::new().with("sql", sql);
        self.0.call("sqlGet", args.merge(opt_params)).await
    }
}

pub struct StyleResource<'a, T>(Resource<'a, T>);

impl<T: Transport> StyleResource<'_, T> {
    pub async fn delete(&self, table_id: &str, style_id: i32, opt_params: OptParams) -> Result<()> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with("styleId", style_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(
        &self,
        table_id: &str,
        style_id: i32,
        opt_params: OptParams,
    ) -> Result<StyleSetting> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with("styleId", style_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn insert(
        &self,
        table_id: &str,
        body: &StyleSetting,
        opt_params: OptParams,
    ) -> Result<StyleSetting> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with_body(body)?;
        self.0.call("insert", args.merge(opt_params)).await
    }

    pub async fn list(&self, table_id: &str, opt_params: OptParams) -> Result<StyleSettingList> {
        let args = InvocationArgs::new().with("tableId", table_id);
        self.0.call("list", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        table_id: &str,
        style_id: i32,
        body: &StyleSetting,
        opt_params: OptParams,
    ) -> Result<StyleSetting> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with("styleId", style_id)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        table_id: &str,
        style_id: i32,
        body: &StyleSetting,
        opt_params: OptParams,
    ) -> Result<StyleSetting> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with("styleId", style_id)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }
}

pub struct TableResource<'a, T>(Resource<'a, T>);

impl<T: Transport> TableResource<'_, T> {
    /// Copy a table
    pub async fn copy(&self, table_id: &str, opt_params: OptParams) -> Result<Table> {
        let args = InvocationArgs::new().with("tableId", table_id);
        self.0.call("copy", args.merge(opt_params)).await
    }

    pub async fn delete(&self, table_id: &str, opt_params: OptParams) -> Result<()> {
        let args = InvocationArgs::new().with("tableId", table_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(&self, table_id: &str, opt_params: OptParams) -> Result<Table> {
        let args = InvocationArgs::new().with("tableId", table_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    /// Import rows; the data itself is sent as media and is not supported here
    pub async fn import_rows(&self, table_id: &str, opt_params: OptParams) -> Result<Import> {
        let args = InvocationArgs::new().with("tableId", table_id);
        self.0.call("importRows", args.merge(opt_params)).await
    }

    pub async fn import_table(&self, name: &str, opt_params: OptParams) -> Result<Table> {
        let args = InvocationArgs::new().with("name", name);
        self.0.call("importTable", args.merge(opt_params)).await
    }

    pub async fn insert(&self, body: &Table, opt_params: OptParams) -> Result<Table> {
        let args = InvocationArgs::new()
            .with_body(body)?;
        self.0.call("insert", args.merge(opt_params)).await
    }

    pub async fn list(&self, opt_params: OptParams) -> Result<TableList> {
        self.0.call("list", InvocationArgs::new().merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        table_id: &str,
        body: &Table,
        opt_params: OptParams,
    ) -> Result<Table> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    /// Replace all rows; returns the task doing the work
    pub async fn replace_rows(&self, table_id: &str, opt_params: OptParams) -> Result<Task> {
        let args = InvocationArgs::new().with("tableId", table_id);
        self.0.call("replaceRows", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        table_id: &str,
        body: &Table,
        opt_params: OptParams,
    ) -> Result<Table> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }
}

pub struct TaskResource<'a, T>(Resource<'a, T>);

impl<T: Transport> TaskResource<'_, T> {
    pub async fn delete(&self, table_id: &str, task_id: &str, opt_params: OptParams) -> Result<()> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with("taskId", task_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(&self, table_id: &str, task_id: &str, opt_params: OptParams) -> Result<Task> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with("taskId", task_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn list(&self, table_id: &str, opt_params: OptParams) -> Result<TaskList> {
        let args = InvocationArgs::new().with("tableId", table_id);
        self.0.call("list", args.merge(opt_params)).await
    }
}

pub struct TemplateResource<'a, T>(Resource<'a, T>);

impl<T: Transport> TemplateResource<'_, T> {
    pub async fn delete(
        &self,
        table_id: &str,
        template_id: i32,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with("templateId", template_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(
        &self,
        table_id: &str,
        template_id: i32,
        opt_params: OptParams,
    ) -> Result<Template> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with("templateId", template_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn insert(
        &self,
        table_id: &str,
        body: &Template,
        opt_params: OptParams,
    ) -> Result<Template> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with_body(body)?;
        self.0.call("insert", args.merge(opt_params)).await
    }

    pub async fn list(&self, table_id: &str, opt_params: OptParams) -> Result<TemplateList> {
        let args = InvocationArgs::new().with("tableId", table_id);
        self.0.call("list", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        table_id: &str,
        template_id: i32,
        body: &Template,
        opt_params: OptParams,
    ) -> Result<Template> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with("templateId", template_id)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        table_id: &str,
        template_id: i32,
        body: &Template,
        opt_params: OptParams,
    ) -> Result<Template> {
        let args = InvocationArgs::new()
            .with("tableId", table_id)
            .with("templateId", template_id)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcp::transport::spy::SpyTransport;
    use crate::opt_params;
    use crate::resource::HttpMethod;

    #[tokio::test]
    async fn test_sql_query_goes_in_query_string() {
        let spy = SpyTransport::new(
            200,
            r#"{"kind": "fusiontables#sqlresponse", "columns": ["n"], "rows": [[3]]}"#,
        );
        let tables = FusiontablesService::new(&spy);

        let response = tables
            .query()
            .sql_get("SELECT COUNT() FROM t1", opt_params! { "hdrs" => false })
            .await
            .unwrap();

        assert_eq!(response.records()[0]["n"], 3);
        let call = &spy.calls()[0];
        assert_eq!(call.method, HttpMethod::Get);
        assert_eq!(
            call.path_and_query(),
            "/fusiontables/v2/query?sql=SELECT%20COUNT%28%29%20FROM%20t1&hdrs=false"
        );
    }

    #[tokio::test]
    async fn test_integer_path_parameter() {
        let spy = SpyTransport::new(200, r#"{"styleId": 7, "tableId": "t1"}"#);
        let tables = FusiontablesService::new(&spy);

        let style = tables.style().get("t1", 7, opt_params!()).await.unwrap();

        assert_eq!(style.style_id, Some(7));
        assert_eq!(
            spy.calls()[0].path_and_query(),
            "/fusiontables/v2/tables/t1/styles/7"
        );
    }
}
