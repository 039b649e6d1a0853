//! Calendar API v3
//!
//! Events, calendars, access rules and free/busy queries.

use crate::error::Result;
use crate::gcp::transport::Transport;
use crate::model::calendar::{
    Acl, AclRule, Calendar, CalendarList, CalendarListEntry, Channel, Colors, Event, Events,
    FreeBusyRequest, FreeBusyResponse, Setting, Settings,
};
use crate::resource::fetcher::{fetch_all_pages, PAGE_TOKEN_PARAMETER};
use crate::resource::registry::{builtin_service, ServiceDef};
use crate::resource::{InvocationArgs, OptParams, Resource, ResourceInvoker};

/// Typed client for the Calendar API v3
pub struct CalendarService<T> {
    invoker: ResourceInvoker<T>,
    service: &'static ServiceDef,
}

impl<T: Transport> CalendarService<T> {
    pub fn new(transport: T) -> Self {
        Self::with_invoker(ResourceInvoker::new(transport))
    }

    pub fn with_invoker(invoker: ResourceInvoker<T>) -> Self {
        Self {
            invoker,
            service: builtin_service("calendar"),
        }
    }

    pub fn invoker(&self) -> &ResourceInvoker<T> {
        &self.invoker
    }

    pub fn service(&self) -> &'static ServiceDef {
        self.service
    }

    pub fn acl(&self) -> AclResource<'_, T> {
        AclResource(self.invoker.resource(self.service, "acl"))
    }

    pub fn calendar_list(&self) -> CalendarListResource<'_, T> {
        CalendarListResource(self.invoker.resource(self.service, "calendarList"))
    }

    pub fn calendars(&self) -> CalendarsResource<'_, T> {
        CalendarsResource(self.invoker.resource(self.service, "calendars"))
    }

    pub fn channels(&self) -> ChannelsResource<'_, T> {
        ChannelsResource(self.invoker.resource(self.service, "channels"))
    }

    pub fn colors(&self) -> ColorsResource<'_, T> {
        ColorsResource(self.invoker.resource(self.service, "colors"))
    }

    pub fn events(&self) -> EventsResource<'_, T> {
        EventsResource(self.invoker.resource(self.service, "events"))
    }

    pub fn freebusy(&self) -> FreebusyResource<'_, T> {
        FreebusyResource(self.invoker.resource(self.service, "freebusy"))
    }

    pub fn settings(&self) -> SettingsResource<'_, T> {
        SettingsResource(self.invoker.resource(self.service, "settings"))
    }
}

pub struct AclResource<'a, T>(Resource<'a, T>);

impl<T: Transport> AclResource<'_, T> {
    pub async fn delete(
        &self,
        calendar_id: &str,
        rule_id: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with("ruleId", rule_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(
        &self,
        calendar_id: &str,
        rule_id: &str,
        opt_params: OptParams,
    ) -> Result<AclRule> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with("ruleId", rule_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn insert(
        &self,
        calendar_id: &str,
        body: &AclRule,
        opt_params: OptParams,
    ) -> Result<AclRule> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with_body(body)?;
        self.0.call("insert", args.merge(opt_params)).await
    }

    pub async fn list(&self, calendar_id: &str, opt_params: OptParams) -> Result<Acl> {
        let args = InvocationArgs::new().with("calendarId", calendar_id);
        self.0.call("list", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        calendar_id: &str,
        rule_id: &str,
        body: &AclRule,
        opt_params: OptParams,
    ) -> Result<AclRule> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with("ruleId", rule_id)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        calendar_id: &str,
        rule_id: &str,
        body: &AclRule,
        opt_params: OptParams,
    ) -> Result<AclRule> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with("ruleId", rule_id)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }

    /// Watch for changes to the access rules of a calendar
    pub async fn watch(
        &self,
        calendar_id: &str,
        body: &Channel,
        opt_params: OptParams,
    ) -> Result<Channel> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with_body(body)?;
        self.0.call("watch", args.merge(opt_params)).await
    }
}

pub struct CalendarListResource<'a, T>(Resource<'a, T>);

impl<T: Transport> CalendarListResource<'_, T> {
    /// Remove a calendar from the user's calendar list
    pub async fn delete(&self, calendar_id: &str, opt_params: OptParams) -> Result<()> {
        let args = InvocationArgs::new().with("calendarId", calendar_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(&self, calendar_id: &str, opt_params: OptParams) -> Result<CalendarListEntry> {
        let args = InvocationArgs::new().with("calendarId", calendar_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    /// Add an existing calendar to the user's calendar list
    pub async fn insert(
        &self,
        body: &CalendarListEntry,
        opt_params: OptParams,
    ) -> Result<CalendarListEntry> {
        let args = InvocationArgs::new()
            .with_body(body)?;
        self.0.call("insert", args.merge(opt_params)).await
    }

    pub async fn list(&self, opt_params: OptParams) -> Result<CalendarList> {
        self.0.call("list", InvocationArgs::new().merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        calendar_id: &str,
        body: &CalendarListEntry,
        opt_params: OptParams,
    ) -> Result<CalendarListEntry> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        calendar_id: &str,
        body: &CalendarListEntry,
        opt_params: OptParams,
    ) -> Result<CalendarListEntry> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }

    pub async fn watch(&self, body: &Channel, opt_params: OptParams) -> Result<Channel> {
        let args = InvocationArgs::new()
            .with_body(body)?;
        self.0.call("watch", args.merge(opt_params)).await
    }
}

pub struct CalendarsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> CalendarsResource<'_, T> {
    /// Delete all events from a primary calendar
    pub async fn clear(&self, calendar_id: &str, opt_params: OptParams) -> Result<()> {
        let args = InvocationArgs::new().with("calendarId", calendar_id);
        self.0.call_void("clear", args.merge(opt_params)).await
    }

    /// Delete a secondary calendar. Use `clear` for the primary calendar
    pub async fn delete(&self, calendar_id: &str, opt_params: OptParams) -> Result<()> {
        let args = InvocationArgs::new().with("calendarId", calendar_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(&self, calendar_id: &str, opt_params: OptParams) -> Result<Calendar> {
        let args = InvocationArgs::new().with("calendarId", calendar_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn insert(&self, body: &Calendar, opt_params: OptParams) -> Result<Calendar> {
        let args = InvocationArgs::new()
            .with_body(body)?;
        self.0.call("insert", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        calendar_id: &str,
        body: &Calendar,
        opt_params: OptParams,
    ) -> Result<Calendar> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        calendar_id: &str,
        body: &Calendar,
        opt_params: OptParams,
    ) -> Result<Calendar> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }
}

pub struct ChannelsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> ChannelsResource<'_, T> {
    /// Stop watching through a channel; only `id` and `resource_id` are needed
    pub async fn stop(&self, body: &Channel, opt_params: OptParams) -> Result<()> {
        let args = InvocationArgs::new()
            .with_body(body)?;
        self.0.call_void("stop", args.merge(opt_params)).await
    }
}

pub struct ColorsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> ColorsResource<'_, T> {
    pub async fn get(&self, opt_params: OptParams) -> Result<Colors> {
        self.0.call("get", InvocationArgs::new().merge(opt_params)).await
    }
}

pub struct EventsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> EventsResource<'_, T> {
    pub async fn delete(
        &self,
        calendar_id: &str,
        event_id: &str,
        opt_params: OptParams,
    ) -> Result<()> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with("eventId", event_id);
        self.0.call_void("delete", args.merge(opt_params)).await
    }

    pub async fn get(
        &self,
        calendar_id: &str,
        event_id: &str,
        opt_params: OptParams,
    ) -> Result<Event> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with("eventId", event_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    /// Import a private copy of an existing event; `i_cal_uid` is required
    pub async fn import(
        &self,
        calendar_id: &str,
        body: &Event,
        opt_params: OptParams,
    ) -> Result<Event> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with_body(body)?;
        self.0.call("import", args.merge(opt_params)).await
    }

    pub async fn insert(
        &self,
        calendar_id: &str,
        body: &Event,
        opt_params: OptParams,
    ) -> Result<Event> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with_body(body)?;
        self.0.call("insert", args.merge(opt_params)).await
    }

    /// Instances of a recurring event
    pub async fn instances(
        &self,
        calendar_id: &str,
        event_id: &str,
        opt_params: OptParams,
    ) -> Result<Events> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with("eventId", event_id);
        self.0.call("instances", args.merge(opt_params)).await
    }

    pub async fn list(&self, calendar_id: &str, opt_params: OptParams) -> Result<Events> {
        let args = InvocationArgs::new().with("calendarId", calendar_id);
        self.0.call("list", args.merge(opt_params)).await
    }

    /// Move an event to the calendar `destination`
    pub async fn move_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        destination: &str,
        opt_params: OptParams,
    ) -> Result<Event> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with("eventId", event_id)
            .with("destination", destination);
        self.0.call("move", args.merge(opt_params)).await
    }

    pub async fn patch(
        &self,
        calendar_id: &str,
        event_id: &str,
        body: &Event,
        opt_params: OptParams,
    ) -> Result<Event> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with("eventId", event_id)
            .with_body(body)?;
        self.0.call("patch", args.merge(opt_params)).await
    }

    /// Create an event from free text such as "Lunch tomorrow at noon"
    pub async fn quick_add(
        &self,
        calendar_id: &str,
        text: &str,
        opt_params: OptParams,
    ) -> Result<Event> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with("text", text);
        self.0.call("quickAdd", args.merge(opt_params)).await
    }

    pub async fn update(
        &self,
        calendar_id: &str,
        event_id: &str,
        body: &Event,
        opt_params: OptParams,
    ) -> Result<Event> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with("eventId", event_id)
            .with_body(body)?;
        self.0.call("update", args.merge(opt_params)).await
    }

    pub async fn watch(
        &self,
        calendar_id: &str,
        body: &Channel,
        opt_params: OptParams,
    ) -> Result<Channel> {
        let args = InvocationArgs::new()
            .with("calendarId", calendar_id)
            .with_body(body)?;
        self.0.call("watch", args.merge(opt_params)).await
    }
}

pub struct FreebusyResource<'a, T>(Resource<'a, T>);

impl<T: Transport> FreebusyResource<'_, T> {
    /// Busy periods of a set of calendars
    pub async fn query(
        &self,
        body: &FreeBusyRequest,
        opt_params: OptParams,
    ) -> Result<FreeBusyResponse> {
        let args = InvocationArgs::new()
            .with_body(body)?;
        self.0.call("query", args.merge(opt_params)).await
    }
}

pub struct SettingsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> SettingsResource<'_, T> {
    pub async fn get(&self, setting: &str, opt_params: OptParams) -> Result<Setting> {
        let args = InvocationArgs::new().with("setting", setting);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn list(&self, opt_params: OptParams) -> Result<Settings> {
        self.0.call("list", InvocationArgs::new().merge(opt_params)).await
    }

    pub async fn watch(&self, body: &Channel, opt_params: OptParams) -> Result<Channel> {
        let args = InvocationArgs::new()
            .with_body(body)?;
        self.0.call("watch", args.merge(opt_params)).await
    }
}

impl<T: Transport> EventsResource<'_, T> {
    /// Every event of a calendar, following page tokens
    pub async fn list_all(&self, calendar_id: &str, opt_params: OptParams) -> Result<Vec<Event>> {
        fetch_all_pages(|page_token| {
            let mut params = opt_params.clone();
            if let Some(token) = page_token {
                params.insert(PAGE_TOKEN_PARAMETER.to_string(), token.into());
            }
            self.list(calendar_id, params)
        })
        .await
    }
}

impl<T: Transport> CalendarListResource<'_, T> {
    pub async fn list_all(&self, opt_params: OptParams) -> Result<Vec<CalendarListEntry>> {
        fetch_all_pages(|page_token| {
            let mut params = opt_params.clone();
            if let Some(token) = page_token {
                params.insert(PAGE_TOKEN_PARAMETER.to_string(), token.into());
            }
            self.list(params)
        })
        .await
    }
}
